//! Driven port for product persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DepartmentId, Product, ProductId};

/// Errors surfaced by product store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductStoreError {
    /// Store connectivity failures.
    #[error("product store connection failed: {message}")]
    Connection {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("product store query failed: {message}")]
    Query {
        /// Adapter-supplied description of the failure.
        message: String,
    },
}

impl ProductStoreError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence port for product records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// All products, in no particular order.
    async fn find_all(&self) -> Result<Vec<Product>, ProductStoreError>;

    /// Fetch a product by id.
    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductStoreError>;

    /// All products referencing the given department.
    async fn find_by_department(
        &self,
        department: &DepartmentId,
    ) -> Result<Vec<Product>, ProductStoreError>;

    /// Number of stored products.
    async fn count(&self) -> Result<u64, ProductStoreError>;

    /// Persist a new product.
    async fn insert(&self, product: &Product) -> Result<(), ProductStoreError>;

    /// Overwrite the record with the product's id, preserving the id.
    /// Returns `false` when no record carries that id.
    async fn update(&self, product: &Product) -> Result<bool, ProductStoreError>;

    /// Remove the record with that id. Returns `false` when no record
    /// carried it.
    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, ProductStoreError>;
}

/// Fixture store for tests that do not exercise product persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProductStore;

#[async_trait]
impl ProductStore for FixtureProductStore {
    async fn find_all(&self) -> Result<Vec<Product>, ProductStoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &ProductId) -> Result<Option<Product>, ProductStoreError> {
        Ok(None)
    }

    async fn find_by_department(
        &self,
        _department: &DepartmentId,
    ) -> Result<Vec<Product>, ProductStoreError> {
        Ok(Vec::new())
    }

    async fn count(&self) -> Result<u64, ProductStoreError> {
        Ok(0)
    }

    async fn insert(&self, _product: &Product) -> Result<(), ProductStoreError> {
        Ok(())
    }

    async fn update(&self, _product: &Product) -> Result<bool, ProductStoreError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: &ProductId) -> Result<bool, ProductStoreError> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookups_miss() {
        let store = FixtureProductStore;
        assert!(
            store
                .find_by_id(&ProductId::random())
                .await
                .expect("fixture lookup succeeds")
                .is_none()
        );
        assert!(
            store
                .find_by_department(&DepartmentId::random())
                .await
                .expect("fixture lookup succeeds")
                .is_empty()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_mutations_are_inert() {
        let store = FixtureProductStore;
        let product =
            Product::new("Apple", "AP-1", 10, DepartmentId::random()).expect("valid product");
        store.insert(&product).await.expect("fixture insert");
        assert!(!store.update(&product).await.expect("fixture update"));
        assert!(
            !store
                .delete_by_id(&product.id)
                .await
                .expect("fixture delete")
        );
    }

    #[rstest]
    fn error_helpers_format_their_message() {
        let err = ProductStoreError::query("broken filter");
        assert!(err.to_string().contains("broken filter"));
    }
}
