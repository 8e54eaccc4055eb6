//! Driving port for product mutations.

use async_trait::async_trait;

use crate::domain::{Error, Product, ProductId};

use super::product_query::ProductFormView;
use super::redirect::Redirect;

/// Raw form fields submitted for a product create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFields {
    /// Submitted product name, unsanitised.
    pub name: Option<String>,
    /// Submitted SKU, unsanitised.
    pub sku: Option<String>,
    /// Submitted quantity text, unsanitised.
    pub quantity: Option<String>,
    /// Submitted department reference, unsanitised.
    pub department: Option<String>,
}

/// Result of a product create or update submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSubmitOutcome {
    /// The mutation succeeded; the caller should navigate to the
    /// product's canonical path.
    Redirect(Redirect),
    /// Validation failed; redraw the form with the echoed values, errors,
    /// and the department selection list. The store was not touched.
    Invalid(ProductFormView),
}

/// Domain use-case port for product mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductCommand: Send + Sync {
    /// Create a product. The department reference must be supplied but
    /// its existence is not verified.
    async fn create(&self, fields: ProductFields) -> Result<ProductSubmitOutcome, Error>;

    /// Overwrite an existing product, preserving its id.
    async fn update(
        &self,
        id: &ProductId,
        fields: ProductFields,
    ) -> Result<ProductSubmitOutcome, Error>;

    /// Remove a product unconditionally; nothing depends on a product.
    async fn delete(&self, id: &ProductId) -> Result<Redirect, Error>;
}

/// Fixture command that accepts every mutation without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductCommand;

#[async_trait]
impl ProductCommand for FixtureProductCommand {
    async fn create(&self, _fields: ProductFields) -> Result<ProductSubmitOutcome, Error> {
        Ok(ProductSubmitOutcome::Redirect(Redirect::to(
            Product::COLLECTION_PATH,
        )))
    }

    async fn update(
        &self,
        id: &ProductId,
        _fields: ProductFields,
    ) -> Result<ProductSubmitOutcome, Error> {
        Ok(ProductSubmitOutcome::Redirect(Redirect::to(
            crate::domain::product::canonical_path(id),
        )))
    }

    async fn delete(&self, _id: &ProductId) -> Result<Redirect, Error> {
        Ok(Redirect::to(Product::COLLECTION_PATH))
    }
}
