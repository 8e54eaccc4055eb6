//! Department domain services.
//!
//! Implements the driving ports for department reads and mutations,
//! enforcing the creation idempotency-by-name rule and the cascade guard
//! that refuses deletion while dependent products exist.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::try_join;

use crate::domain::ports::{
    DepartmentCommand, DepartmentDeleteOutcome, DepartmentDetailView, DepartmentFields,
    DepartmentFormValues, DepartmentFormView, DepartmentQuery, DepartmentStore,
    DepartmentStoreError, DepartmentSubmitOutcome, ProductStore, ProductStoreError, Redirect,
};
use crate::domain::validation::{FieldError, FormValidator};
use crate::domain::{Department, DepartmentId, DepartmentValidationError, Error};

/// Department service implementing the driving ports.
#[derive(Clone)]
pub struct DepartmentService<D, P> {
    departments: Arc<D>,
    products: Arc<P>,
}

impl<D, P> DepartmentService<D, P> {
    /// Create a new service over the given stores.
    pub fn new(departments: Arc<D>, products: Arc<P>) -> Self {
        Self {
            departments,
            products,
        }
    }
}

impl<D, P> DepartmentService<D, P>
where
    D: DepartmentStore,
    P: ProductStore,
{
    fn map_department_error(error: DepartmentStoreError) -> Error {
        match error {
            DepartmentStoreError::Connection { message } => {
                Error::service_unavailable(format!("department store unavailable: {message}"))
            }
            DepartmentStoreError::Query { message } => {
                Error::internal(format!("department store error: {message}"))
            }
        }
    }

    fn map_product_error(error: ProductStoreError) -> Error {
        match error {
            ProductStoreError::Connection { message } => {
                Error::service_unavailable(format!("product store unavailable: {message}"))
            }
            ProductStoreError::Query { message } => {
                Error::internal(format!("product store error: {message}"))
            }
        }
    }

    fn name_constraint_error(error: &DepartmentValidationError) -> FieldError {
        let message = match error {
            DepartmentValidationError::NameTooLong { max } => {
                format!("Department name must be at most {max} characters")
            }
            DepartmentValidationError::EmptyName | DepartmentValidationError::InvalidId => {
                "Department name required".to_owned()
            }
        };
        FieldError::new("name", message)
    }

    fn invalid_form(
        id: Option<DepartmentId>,
        name: String,
        errors: Vec<FieldError>,
    ) -> DepartmentSubmitOutcome {
        DepartmentSubmitOutcome::Invalid(DepartmentFormView {
            department: Some(DepartmentFormValues { id, name }),
            errors,
        })
    }

    /// Fetch the department and its dependents concurrently; the join
    /// fails as a whole when either read fails.
    async fn joined_view(&self, id: &DepartmentId) -> Result<DepartmentDetailView, Error> {
        let (department, products) = try_join!(
            async {
                self.departments
                    .find_by_id(id)
                    .await
                    .map_err(Self::map_department_error)
            },
            async {
                self.products
                    .find_by_department(id)
                    .await
                    .map_err(Self::map_product_error)
            },
        )?;
        Ok(DepartmentDetailView {
            department,
            products,
        })
    }
}

#[async_trait]
impl<D, P> DepartmentQuery for DepartmentService<D, P>
where
    D: DepartmentStore,
    P: ProductStore,
{
    async fn list(&self) -> Result<Vec<Department>, Error> {
        self.departments
            .find_all_ordered()
            .await
            .map_err(Self::map_department_error)
    }

    async fn detail(&self, id: &DepartmentId) -> Result<DepartmentDetailView, Error> {
        self.joined_view(id).await
    }

    async fn delete_confirmation(&self, id: &DepartmentId) -> Result<DepartmentDetailView, Error> {
        self.joined_view(id).await
    }

    async fn update_form(&self, id: &DepartmentId) -> Result<DepartmentFormView, Error> {
        let department = self
            .departments
            .find_by_id(id)
            .await
            .map_err(Self::map_department_error)?;
        Ok(department
            .as_ref()
            .map(DepartmentFormView::for_department)
            .unwrap_or_default())
    }
}

#[async_trait]
impl<D, P> DepartmentCommand for DepartmentService<D, P>
where
    D: DepartmentStore,
    P: ProductStore,
{
    async fn create(&self, fields: DepartmentFields) -> Result<DepartmentSubmitOutcome, Error> {
        let mut form = FormValidator::new();
        let name = form.require("name", fields.name.as_deref(), "Department name required");
        if !form.is_valid() {
            return Ok(Self::invalid_form(None, name, form.into_errors()));
        }

        let department = match Department::new(name.clone()) {
            Ok(department) => department,
            Err(err) => {
                return Ok(Self::invalid_form(
                    None,
                    name,
                    vec![Self::name_constraint_error(&err)],
                ));
            }
        };

        // Creation is idempotent by name: an existing department wins and
        // its canonical path is returned as a success.
        if let Some(existing) = self
            .departments
            .find_by_name(&name)
            .await
            .map_err(Self::map_department_error)?
        {
            return Ok(DepartmentSubmitOutcome::Redirect(Redirect::to(
                existing.canonical_path(),
            )));
        }

        self.departments
            .insert(&department)
            .await
            .map_err(Self::map_department_error)?;
        Ok(DepartmentSubmitOutcome::Redirect(Redirect::to(
            department.canonical_path(),
        )))
    }

    async fn update(
        &self,
        id: &DepartmentId,
        fields: DepartmentFields,
    ) -> Result<DepartmentSubmitOutcome, Error> {
        let mut form = FormValidator::new();
        let name = form.require("name", fields.name.as_deref(), "Name must not be empty.");
        if !form.is_valid() {
            return Ok(Self::invalid_form(Some(*id), name, form.into_errors()));
        }

        // No name-collision check on update; the asymmetry with create is
        // deliberate and pinned by tests.
        let department = match Department::with_id(*id, name.clone()) {
            Ok(department) => department,
            Err(err) => {
                return Ok(Self::invalid_form(
                    Some(*id),
                    name,
                    vec![Self::name_constraint_error(&err)],
                ));
            }
        };

        let updated = self
            .departments
            .update(&department)
            .await
            .map_err(Self::map_department_error)?;
        if updated {
            Ok(DepartmentSubmitOutcome::Redirect(Redirect::to(
                department.canonical_path(),
            )))
        } else {
            Err(Error::not_found("department not found"))
        }
    }

    async fn delete(&self, id: &DepartmentId) -> Result<DepartmentDeleteOutcome, Error> {
        let view = self.joined_view(id).await?;
        if !view.products.is_empty() {
            return Ok(DepartmentDeleteOutcome::Blocked(view));
        }

        self.departments
            .delete_by_id(id)
            .await
            .map_err(Self::map_department_error)?;
        Ok(DepartmentDeleteOutcome::Redirect(Redirect::to(
            Department::COLLECTION_PATH,
        )))
    }
}
