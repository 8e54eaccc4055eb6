//! Driving port for department read operations.
//!
//! Inbound adapters use this port to prepare listing, detail, form, and
//! deletion-confirmation views without importing outbound persistence
//! concerns.

use async_trait::async_trait;

use crate::domain::validation::FieldError;
use crate::domain::{Department, DepartmentId, Error, Product};

/// Detail view joining a department with its dependent products.
///
/// The same shape doubles as the deletion-confirmation view: when a
/// delete is refused, the dependents listed here are the reason.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentDetailView {
    /// The department, absent when the lookup missed.
    pub department: Option<Department>,
    /// Every product referencing the department.
    pub products: Vec<Product>,
}

/// Echoed field values used to redraw a department form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFormValues {
    /// Identifier, present only when editing an existing department.
    pub id: Option<DepartmentId>,
    /// Sanitised name as submitted or stored.
    pub name: String,
}

/// Form view carrying echoed values and any validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DepartmentFormView {
    /// Values to redraw, absent for a blank create form.
    pub department: Option<DepartmentFormValues>,
    /// Ordered validation failures; empty on a fresh form.
    pub errors: Vec<FieldError>,
}

impl DepartmentFormView {
    /// Form view populated from a stored department.
    pub fn for_department(department: &Department) -> Self {
        Self {
            department: Some(DepartmentFormValues {
                id: Some(department.id),
                name: department.name.clone(),
            }),
            errors: Vec::new(),
        }
    }
}

/// Domain use-case port for department reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentQuery: Send + Sync {
    /// All departments ordered by name ascending.
    async fn list(&self) -> Result<Vec<Department>, Error>;

    /// One department with its dependent products.
    async fn detail(&self, id: &DepartmentId) -> Result<DepartmentDetailView, Error>;

    /// Deletion-confirmation data: the department and the dependents that
    /// would block its removal.
    async fn delete_confirmation(&self, id: &DepartmentId) -> Result<DepartmentDetailView, Error>;

    /// Populated form for editing an existing department.
    async fn update_form(&self, id: &DepartmentId) -> Result<DepartmentFormView, Error>;
}

/// Fixture query behaving like an empty store.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDepartmentQuery;

#[async_trait]
impl DepartmentQuery for FixtureDepartmentQuery {
    async fn list(&self) -> Result<Vec<Department>, Error> {
        Ok(Vec::new())
    }

    async fn detail(&self, _id: &DepartmentId) -> Result<DepartmentDetailView, Error> {
        Ok(DepartmentDetailView::default())
    }

    async fn delete_confirmation(&self, _id: &DepartmentId) -> Result<DepartmentDetailView, Error> {
        Ok(DepartmentDetailView::default())
    }

    async fn update_form(&self, _id: &DepartmentId) -> Result<DepartmentFormView, Error> {
        Ok(DepartmentFormView::default())
    }
}
