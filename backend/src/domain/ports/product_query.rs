//! Driving port for product read operations.

use async_trait::async_trait;

use crate::domain::validation::FieldError;
use crate::domain::{Department, Error, Product, ProductId};

/// One row of the product listing: the product's display fields with its
/// department reference resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListEntry {
    /// Product identifier, used for detail links.
    pub id: ProductId,
    /// Product display name.
    pub name: String,
    /// The referenced department, absent when the reference dangles.
    pub department: Option<Department>,
}

/// Echoed field values used to redraw a product form.
///
/// Quantity and department are kept as sanitised text: an error view must
/// echo exactly what was submitted, well-formed or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFormValues {
    /// Identifier, present only when editing an existing product.
    pub id: Option<ProductId>,
    /// Sanitised name as submitted or stored.
    pub name: String,
    /// Sanitised SKU as submitted or stored.
    pub sku: String,
    /// Sanitised quantity text as submitted or stored.
    pub quantity: String,
    /// Sanitised department reference as submitted or stored.
    pub department: String,
}

impl ProductFormValues {
    /// Form values populated from a stored product.
    pub fn for_product(product: &Product) -> Self {
        Self {
            id: Some(product.id),
            name: product.name.clone(),
            sku: product.sku.clone(),
            quantity: product.quantity.to_string(),
            department: product.department.to_string(),
        }
    }
}

/// Form view carrying the department selection list, echoed values, and
/// any validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFormView {
    /// Departments available in the selection control, ordered by name.
    pub departments: Vec<Department>,
    /// Values to redraw, absent for a blank create form.
    pub product: Option<ProductFormValues>,
    /// Ordered validation failures; empty on a fresh form.
    pub errors: Vec<FieldError>,
}

/// Home-page inventory summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InventoryCounts {
    /// Number of stored products.
    pub products: u64,
    /// Number of stored departments.
    pub departments: u64,
}

/// Domain use-case port for product reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductQuery: Send + Sync {
    /// All products with department references resolved.
    async fn list(&self) -> Result<Vec<ProductListEntry>, Error>;

    /// One product by id.
    async fn detail(&self, id: &ProductId) -> Result<Option<Product>, Error>;

    /// Blank create form with the department selection list.
    async fn create_form(&self) -> Result<ProductFormView, Error>;

    /// Populated form for editing an existing product.
    async fn update_form(&self, id: &ProductId) -> Result<ProductFormView, Error>;

    /// Deletion-confirmation data: the product to be removed.
    async fn delete_confirmation(&self, id: &ProductId) -> Result<Option<Product>, Error>;

    /// Product and department counts for the home page.
    async fn inventory_counts(&self) -> Result<InventoryCounts, Error>;
}

/// Fixture query behaving like an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductQuery;

#[async_trait]
impl ProductQuery for FixtureProductQuery {
    async fn list(&self) -> Result<Vec<ProductListEntry>, Error> {
        Ok(Vec::new())
    }

    async fn detail(&self, _id: &ProductId) -> Result<Option<Product>, Error> {
        Ok(None)
    }

    async fn create_form(&self) -> Result<ProductFormView, Error> {
        Ok(ProductFormView::default())
    }

    async fn update_form(&self, _id: &ProductId) -> Result<ProductFormView, Error> {
        Ok(ProductFormView::default())
    }

    async fn delete_confirmation(&self, _id: &ProductId) -> Result<Option<Product>, Error> {
        Ok(None)
    }

    async fn inventory_counts(&self) -> Result<InventoryCounts, Error> {
        Ok(InventoryCounts::default())
    }
}
