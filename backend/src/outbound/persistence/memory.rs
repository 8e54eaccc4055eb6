//! In-process document store backing both entity collections.
//!
//! The store keeps each collection in a map guarded by its own lock, so a
//! write touches exactly one entity and relies on nothing beyond that
//! lock — the single-write atomicity the domain expects from any entity
//! store. A driver-backed adapter would implement the same two ports.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    DepartmentStore, DepartmentStoreError, ProductStore, ProductStoreError,
};
use crate::domain::{Department, DepartmentId, Product, ProductId};

/// Shared in-process entity store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    departments: RwLock<HashMap<DepartmentId, Department>>,
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read_departments(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<DepartmentId, Department>>, DepartmentStoreError> {
        self.departments
            .read()
            .map_err(|_| DepartmentStoreError::query("department collection lock poisoned"))
    }

    fn write_departments(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<DepartmentId, Department>>, DepartmentStoreError> {
        self.departments
            .write()
            .map_err(|_| DepartmentStoreError::query("department collection lock poisoned"))
    }

    fn read_products(
        &self,
    ) -> Result<RwLockReadGuard<'_, HashMap<ProductId, Product>>, ProductStoreError> {
        self.products
            .read()
            .map_err(|_| ProductStoreError::query("product collection lock poisoned"))
    }

    fn write_products(
        &self,
    ) -> Result<RwLockWriteGuard<'_, HashMap<ProductId, Product>>, ProductStoreError> {
        self.products
            .write()
            .map_err(|_| ProductStoreError::query("product collection lock poisoned"))
    }
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn find_all_ordered(&self) -> Result<Vec<Department>, DepartmentStoreError> {
        let guard = self.read_departments()?;
        let mut departments: Vec<Department> = guard.values().cloned().collect();
        // Ascending lexical order by name, case-sensitive.
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    async fn find_by_id(
        &self,
        id: &DepartmentId,
    ) -> Result<Option<Department>, DepartmentStoreError> {
        Ok(self.read_departments()?.get(id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Department>, DepartmentStoreError> {
        Ok(self
            .read_departments()?
            .values()
            .find(|department| department.name == name)
            .cloned())
    }

    async fn count(&self) -> Result<u64, DepartmentStoreError> {
        Ok(self.read_departments()?.len() as u64)
    }

    async fn insert(&self, department: &Department) -> Result<(), DepartmentStoreError> {
        self.write_departments()?
            .insert(department.id, department.clone());
        Ok(())
    }

    async fn update(&self, department: &Department) -> Result<bool, DepartmentStoreError> {
        let mut guard = self.write_departments()?;
        match guard.get_mut(&department.id) {
            Some(slot) => {
                *slot = department.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &DepartmentId) -> Result<bool, DepartmentStoreError> {
        Ok(self.write_departments()?.remove(id).is_some())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>, ProductStoreError> {
        Ok(self.read_products()?.values().cloned().collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductStoreError> {
        Ok(self.read_products()?.get(id).cloned())
    }

    async fn find_by_department(
        &self,
        department: &DepartmentId,
    ) -> Result<Vec<Product>, ProductStoreError> {
        Ok(self
            .read_products()?
            .values()
            .filter(|product| product.department == *department)
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<u64, ProductStoreError> {
        Ok(self.read_products()?.len() as u64)
    }

    async fn insert(&self, product: &Product) -> Result<(), ProductStoreError> {
        self.write_products()?.insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<bool, ProductStoreError> {
        let mut guard = self.write_products()?;
        match guard.get_mut(&product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &ProductId) -> Result<bool, ProductStoreError> {
        Ok(self.write_products()?.remove(id).is_some())
    }
}
