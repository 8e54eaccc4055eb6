//! Redirect result shared by the mutating use cases.

/// A successful mutation's redirect target: the canonical path of the
/// affected entity, or of a collection listing after a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Path the caller should navigate to.
    pub to: String,
}

impl Redirect {
    /// Build a redirect from any path representation.
    pub fn to(path: impl Into<String>) -> Self {
        Self { to: path.into() }
    }
}
