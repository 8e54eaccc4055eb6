//! Response schemas shared across the HTTP handlers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Department, Product};

/// A department as rendered in listings, details, and selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    /// Department identifier.
    pub id: String,
    /// Department display name.
    pub name: String,
    /// Canonical path of the department's detail page.
    pub url: String,
}

impl From<&Department> for DepartmentView {
    fn from(value: &Department) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            url: value.canonical_path(),
        }
    }
}

impl From<Department> for DepartmentView {
    fn from(value: Department) -> Self {
        Self::from(&value)
    }
}

/// A product as rendered in details and dependent listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    /// Product identifier.
    pub id: String,
    /// Product display name.
    pub name: String,
    /// Stock-keeping unit code.
    pub sku: String,
    /// Units on hand.
    pub quantity: i64,
    /// Referenced department's identifier.
    pub department: String,
    /// Canonical path of the product's detail page.
    pub url: String,
}

impl From<&Product> for ProductView {
    fn from(value: &Product) -> Self {
        Self {
            id: value.id.to_string(),
            name: value.name.clone(),
            sku: value.sku.clone(),
            quantity: value.quantity,
            department: value.department.to_string(),
            url: value.canonical_path(),
        }
    }
}

impl From<Product> for ProductView {
    fn from(value: Product) -> Self {
        Self::from(&value)
    }
}
