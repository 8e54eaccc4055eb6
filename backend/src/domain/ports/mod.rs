//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports describe the use cases inbound adapters may invoke;
//! driven ports describe how the domain expects to reach the entity
//! store. Each driven port exposes strongly typed errors so adapters map
//! their failures into predictable variants.

mod department_command;
mod department_query;
mod department_store;
mod product_command;
mod product_query;
mod product_store;
mod redirect;

#[cfg(test)]
pub use department_command::MockDepartmentCommand;
pub use department_command::{
    DepartmentCommand, DepartmentDeleteOutcome, DepartmentFields, DepartmentSubmitOutcome,
    FixtureDepartmentCommand,
};
#[cfg(test)]
pub use department_query::MockDepartmentQuery;
pub use department_query::{
    DepartmentDetailView, DepartmentFormValues, DepartmentFormView, DepartmentQuery,
    FixtureDepartmentQuery,
};
#[cfg(test)]
pub use department_store::MockDepartmentStore;
pub use department_store::{DepartmentStore, DepartmentStoreError, FixtureDepartmentStore};
#[cfg(test)]
pub use product_command::MockProductCommand;
pub use product_command::{
    FixtureProductCommand, ProductCommand, ProductFields, ProductSubmitOutcome,
};
#[cfg(test)]
pub use product_query::MockProductQuery;
pub use product_query::{
    FixtureProductQuery, InventoryCounts, ProductFormValues, ProductFormView, ProductListEntry,
    ProductQuery,
};
#[cfg(test)]
pub use product_store::MockProductStore;
pub use product_store::{FixtureProductStore, ProductStore, ProductStoreError};
pub use redirect::Redirect;
