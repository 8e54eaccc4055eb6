//! Form validation applied before an entity is constructed or updated.
//!
//! The contract: given named input fields and their requirements, produce
//! either an empty error list (success) or an ordered list of
//! `{field, message}` entries. Every text field is sanitised
//! unconditionally — even when validation fails — so values echoed back
//! into an error view are already safe to render. Validation failure
//! never touches the entity store.

use serde::Serialize;
use utoipa::ToSchema;

use super::sanitize::sanitize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Name of the offending form field.
    pub field: String,
    /// Message suitable for display next to the field.
    pub message: String,
}

impl FieldError {
    /// Build a field error from borrowed parts.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Collects sanitised field values and ordered validation errors for one
/// submitted form.
///
/// # Examples
/// ```
/// use grocer_backend::domain::validation::FormValidator;
///
/// let mut form = FormValidator::new();
/// let name = form.require("name", Some("  Produce "), "Department name required");
/// assert_eq!(name, "Produce");
/// assert!(form.is_valid());
/// ```
#[derive(Debug, Default)]
pub struct FormValidator {
    errors: Vec<FieldError>,
}

impl FormValidator {
    /// Start validating a submitted form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sanitise a field and record a required-rule failure when the
    /// sanitised value is empty. The sanitised value is always returned
    /// so it can be echoed back into the form.
    pub fn require(&mut self, field: &'static str, value: Option<&str>, message: &str) -> String {
        let sanitised = sanitize(value.unwrap_or_default());
        if sanitised.is_empty() {
            self.errors.push(FieldError::new(field, message));
        }
        sanitised
    }

    /// Parse a sanitised numeric field, recording a failure when the text
    /// is present but not a number. An empty value is the required rule's
    /// concern and records nothing here.
    pub fn numeric(&mut self, field: &'static str, sanitised: &str, message: &str) -> Option<i64> {
        if sanitised.is_empty() {
            return None;
        }
        match sanitised.parse::<i64>() {
            Ok(value) => Some(value),
            Err(_) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }

    /// Record a failure discovered outside the rule vocabulary, keeping
    /// the submission order of fields intact.
    pub fn reject(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// `true` while no rule has failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Consume the validator, yielding the ordered error list.
    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}
