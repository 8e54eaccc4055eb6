//! Driving port for department mutations.

use async_trait::async_trait;

use crate::domain::{Department, DepartmentId, Error};

use super::department_query::{DepartmentDetailView, DepartmentFormView};
use super::redirect::Redirect;

/// Raw form fields submitted for a department create or update.
///
/// Fields are optional because a browser omits empty inputs; the
/// validation layer treats absence and blankness identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentFields {
    /// Submitted department name, unsanitised.
    pub name: Option<String>,
}

/// Result of a department create or update submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentSubmitOutcome {
    /// The mutation succeeded (or the name already existed on create);
    /// the caller should navigate to the entity's canonical path.
    Redirect(Redirect),
    /// Validation failed; redraw the form with the echoed values and
    /// errors. The store was not touched.
    Invalid(DepartmentFormView),
}

/// Result of a department deletion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentDeleteOutcome {
    /// No dependent products existed; the department was removed and the
    /// caller should navigate to the department listing.
    Redirect(Redirect),
    /// Dependent products exist; nothing was mutated and the
    /// confirmation view explains why.
    Blocked(DepartmentDetailView),
}

/// Domain use-case port for department mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DepartmentCommand: Send + Sync {
    /// Create a department, idempotently by name.
    async fn create(&self, fields: DepartmentFields) -> Result<DepartmentSubmitOutcome, Error>;

    /// Overwrite an existing department's name, preserving its id.
    async fn update(
        &self,
        id: &DepartmentId,
        fields: DepartmentFields,
    ) -> Result<DepartmentSubmitOutcome, Error>;

    /// Delete a department unless dependent products block it.
    async fn delete(&self, id: &DepartmentId) -> Result<DepartmentDeleteOutcome, Error>;
}

/// Fixture command that accepts every mutation without persisting it.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDepartmentCommand;

#[async_trait]
impl DepartmentCommand for FixtureDepartmentCommand {
    async fn create(&self, _fields: DepartmentFields) -> Result<DepartmentSubmitOutcome, Error> {
        Ok(DepartmentSubmitOutcome::Redirect(Redirect::to(
            Department::COLLECTION_PATH,
        )))
    }

    async fn update(
        &self,
        id: &DepartmentId,
        _fields: DepartmentFields,
    ) -> Result<DepartmentSubmitOutcome, Error> {
        Ok(DepartmentSubmitOutcome::Redirect(Redirect::to(
            crate::domain::department::canonical_path(id),
        )))
    }

    async fn delete(&self, _id: &DepartmentId) -> Result<DepartmentDeleteOutcome, Error> {
        Ok(DepartmentDeleteOutcome::Redirect(Redirect::to(
            Department::COLLECTION_PATH,
        )))
    }
}
