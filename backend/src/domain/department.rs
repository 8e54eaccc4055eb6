//! Department data model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors returned by the [`Department`] constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepartmentValidationError {
    /// Identifier was empty or not a valid UUID.
    InvalidId,
    /// Name was empty after trimming.
    EmptyName,
    /// Name exceeded the maximum length.
    NameTooLong {
        /// Maximum number of characters permitted.
        max: usize,
    },
}

impl fmt::Display for DepartmentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "department id must be a valid UUID"),
            Self::EmptyName => write!(f, "department name must not be empty"),
            Self::NameTooLong { max } => {
                write!(f, "department name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for DepartmentValidationError {}

/// Stable department identifier stored as a UUID.
///
/// System-generated on creation and immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentId(Uuid);

impl DepartmentId {
    /// Generate a new random [`DepartmentId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validate and construct a [`DepartmentId`] from text.
    pub fn parse(id: impl AsRef<str>) -> Result<Self, DepartmentValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(DepartmentValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| DepartmentValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DepartmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DepartmentId> for String {
    fn from(value: DepartmentId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for DepartmentId {
    type Error = DepartmentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

/// A grocery department.
///
/// ## Invariants
/// - `name` is non-empty after trimming and at most
///   [`Department::NAME_MAX`] characters. Callers sanitise inbound text
///   before construction; the constructors enforce the invariant on
///   whatever they are given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Department {
    /// System-generated identifier, immutable after creation.
    pub id: DepartmentId,
    /// Display name, unique-by-creation within the store.
    pub name: String,
}

impl Department {
    /// Maximum number of characters permitted in a department name.
    pub const NAME_MAX: usize = 100;

    /// Canonical location of the department listing.
    pub const COLLECTION_PATH: &'static str = "/grocery/departments";

    /// Create a department with a freshly generated identifier.
    ///
    /// # Examples
    /// ```
    /// use grocer_backend::domain::Department;
    ///
    /// let department = Department::new("Produce").expect("valid name");
    /// assert_eq!(department.name, "Produce");
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, DepartmentValidationError> {
        Self::with_id(DepartmentId::random(), name)
    }

    /// Create a department preserving an existing identifier, as update
    /// operations must.
    pub fn with_id(
        id: DepartmentId,
        name: impl Into<String>,
    ) -> Result<Self, DepartmentValidationError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { id, name })
    }

    /// Deterministic location of this department, used for post-mutation
    /// redirects and detail links.
    pub fn canonical_path(&self) -> String {
        canonical_path(&self.id)
    }
}

/// Compute a department's canonical path from its identifier alone.
pub fn canonical_path(id: &DepartmentId) -> String {
    format!("/grocery/department/{id}")
}

fn validate_name(name: &str) -> Result<(), DepartmentValidationError> {
    if name.trim().is_empty() {
        return Err(DepartmentValidationError::EmptyName);
    }
    if name.chars().count() > Department::NAME_MAX {
        return Err(DepartmentValidationError::NameTooLong {
            max: Department::NAME_MAX,
        });
    }
    Ok(())
}
