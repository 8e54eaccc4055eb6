//! Driven port for department persistence.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Department, DepartmentId};

/// Errors surfaced by department store adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DepartmentStoreError {
    /// Store connectivity failures.
    #[error("department store connection failed: {message}")]
    Connection {
        /// Adapter-supplied description of the failure.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("department store query failed: {message}")]
    Query {
        /// Adapter-supplied description of the failure.
        message: String,
    },
}

impl DepartmentStoreError {
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

/// Persistence port for department records.
///
/// Each write touches exactly one record; adapters provide single-write
/// atomicity and no multi-document transactions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentStore: Send + Sync {
    /// All departments in ascending lexical order by name.
    async fn find_all_ordered(&self) -> Result<Vec<Department>, DepartmentStoreError>;

    /// Fetch a department by id.
    async fn find_by_id(
        &self,
        id: &DepartmentId,
    ) -> Result<Option<Department>, DepartmentStoreError>;

    /// Fetch a department whose name matches exactly.
    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, DepartmentStoreError>;

    /// Number of stored departments.
    async fn count(&self) -> Result<u64, DepartmentStoreError>;

    /// Persist a new department.
    async fn insert(&self, department: &Department) -> Result<(), DepartmentStoreError>;

    /// Overwrite the record with the department's id, preserving the id.
    /// Returns `false` when no record carries that id.
    async fn update(&self, department: &Department) -> Result<bool, DepartmentStoreError>;

    /// Remove the record with that id. Returns `false` when no record
    /// carried it.
    async fn delete_by_id(&self, id: &DepartmentId) -> Result<bool, DepartmentStoreError>;
}

/// Fixture store for tests that do not exercise department persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDepartmentStore;

#[async_trait]
impl DepartmentStore for FixtureDepartmentStore {
    async fn find_all_ordered(&self) -> Result<Vec<Department>, DepartmentStoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(
        &self,
        _id: &DepartmentId,
    ) -> Result<Option<Department>, DepartmentStoreError> {
        Ok(None)
    }

    async fn find_by_name(&self, _name: &str) -> Result<Option<Department>, DepartmentStoreError> {
        Ok(None)
    }

    async fn count(&self) -> Result<u64, DepartmentStoreError> {
        Ok(0)
    }

    async fn insert(&self, _department: &Department) -> Result<(), DepartmentStoreError> {
        Ok(())
    }

    async fn update(&self, _department: &Department) -> Result<bool, DepartmentStoreError> {
        Ok(false)
    }

    async fn delete_by_id(&self, _id: &DepartmentId) -> Result<bool, DepartmentStoreError> {
        Ok(false)
    }
}
