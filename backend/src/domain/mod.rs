//! Domain primitives, services, and ports.
//!
//! Purpose: define the strongly typed entities, the validation and
//! sanitisation rules applied to inbound form data, and the services
//! enforcing the department/product lifecycle rules. Inbound and outbound
//! adapters depend on this module through its ports; nothing in here
//! imports a transport or a storage driver.

pub mod department;
pub mod department_service;
pub mod error;
pub mod ports;
pub mod product;
pub mod product_service;
pub mod sanitize;
pub mod validation;

pub use self::department::{Department, DepartmentId, DepartmentValidationError};
pub use self::department_service::DepartmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::product::{Product, ProductId, ProductValidationError};
pub use self::product_service::ProductService;
