//! Product data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::department::DepartmentId;

/// Validation errors returned by the [`Product`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// Identifier was empty or not a valid UUID.
    InvalidId,
    /// Name was empty after trimming.
    EmptyName,
    /// SKU was empty after trimming.
    EmptySku,
}

impl fmt::Display for ProductValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "product id must be a valid UUID"),
            Self::EmptyName => write!(f, "product name must not be empty"),
            Self::EmptySku => write!(f, "product sku must not be empty"),
        }
    }
}

impl std::error::Error for ProductValidationError {}

/// Stable product identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(Uuid);

impl ProductId {
    /// Generate a new random [`ProductId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validate and construct a [`ProductId`] from text.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, ProductValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(ProductValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| ProductValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ProductId> for String {
    fn from(value: ProductId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for ProductId {
    type Error = ProductValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// A stocked product belonging to exactly one department.
///
/// ## Invariants
/// - `name` and `sku` are non-empty after trimming.
/// - `department` holds the referenced department's id; the reference is
///   an association, not ownership, and its existence is deliberately not
///   verified at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// System-generated identifier, immutable after creation.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Stock-keeping unit code. Uniqueness is not enforced.
    pub sku: String,
    /// Units on hand.
    pub quantity: i64,
    /// Referenced department's identifier.
    pub department: DepartmentId,
}

impl Product {
    /// Canonical location of the product listing.
    pub const COLLECTION_PATH: &'static str = "/grocery/products";

    /// Create a product with a freshly generated identifier.
    ///
    /// # Examples
    /// ```
    /// use grocer_backend::domain::{DepartmentId, Product};
    ///
    /// let department = DepartmentId::random();
    /// let product = Product::new("Apple", "AP-1", 10, department).expect("valid product");
    /// assert_eq!(product.quantity, 10);
    /// ```
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: i64,
        department: DepartmentId,
    ) -> Result<Self, ProductValidationError> {
        Self::with_id(ProductId::random(), name, sku, quantity, department)
    }

    /// Create a product preserving an existing identifier, as update
    /// operations must.
    pub fn with_id(
        id: ProductId,
        name: impl Into<String>,
        sku: impl Into<String>,
        quantity: i64,
        department: DepartmentId,
    ) -> Result<Self, ProductValidationError> {
        let name = name.into();
        let sku = sku.into();
        if name.trim().is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if sku.trim().is_empty() {
            return Err(ProductValidationError::EmptySku);
        }
        Ok(Self {
            id,
            name,
            sku,
            quantity,
            department,
        })
    }

    /// Deterministic location of this product, used for post-mutation
    /// redirects and detail links.
    pub fn canonical_path(&self) -> String {
        canonical_path(&self.id)
    }
}

/// Compute a product's canonical path from its identifier alone.
pub fn canonical_path(id: &ProductId) -> String {
    format!("/grocery/product/{id}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "AP-1")]
    #[case("   ", "AP-1")]
    fn construction_rejects_blank_names(#[case] name: &str, #[case] sku: &str) {
        let err =
            Product::new(name, sku, 1, DepartmentId::random()).expect_err("blank name rejected");
        assert_eq!(err, ProductValidationError::EmptyName);
    }

    #[rstest]
    #[case("Apple", "")]
    #[case("Apple", "  ")]
    fn construction_rejects_blank_skus(#[case] name: &str, #[case] sku: &str) {
        let err =
            Product::new(name, sku, 1, DepartmentId::random()).expect_err("blank sku rejected");
        assert_eq!(err, ProductValidationError::EmptySku);
    }

    #[rstest]
    fn with_id_preserves_identifier_and_reference() {
        let id = ProductId::random();
        let department = DepartmentId::random();
        let product = Product::with_id(id, "Apple", "AP-1", 10, department).expect("valid");
        assert_eq!(product.id, id);
        assert_eq!(product.department, department);
    }

    #[rstest]
    fn canonical_path_embeds_the_identifier() {
        let product =
            Product::new("Apple", "AP-1", 10, DepartmentId::random()).expect("valid product");
        assert_eq!(
            product.canonical_path(),
            format!("/grocery/product/{}", product.id)
        );
    }

    #[rstest]
    fn id_round_trips_through_text() {
        let id = ProductId::random();
        let parsed = ProductId::parse(id.to_string()).expect("round trip");
        assert_eq!(parsed, id);
    }
}
