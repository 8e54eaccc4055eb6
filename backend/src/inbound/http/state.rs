//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DepartmentCommand, DepartmentQuery, ProductCommand, ProductQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use grocer_backend::domain::ports::{
///     FixtureDepartmentCommand, FixtureDepartmentQuery, FixtureProductCommand,
///     FixtureProductQuery,
/// };
/// use grocer_backend::inbound::http::state::HttpState;
///
/// let state = HttpState::new(
///     Arc::new(FixtureDepartmentQuery),
///     Arc::new(FixtureDepartmentCommand),
///     Arc::new(FixtureProductQuery),
///     Arc::new(FixtureProductCommand),
/// );
/// let _departments = state.departments_query.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// Department read use-cases.
    pub departments_query: Arc<dyn DepartmentQuery>,
    /// Department mutation use-cases.
    pub departments: Arc<dyn DepartmentCommand>,
    /// Product read use-cases.
    pub products_query: Arc<dyn ProductQuery>,
    /// Product mutation use-cases.
    pub products: Arc<dyn ProductCommand>,
}

impl HttpState {
    /// Construct state from the four port implementations.
    pub fn new(
        departments_query: Arc<dyn DepartmentQuery>,
        departments: Arc<dyn DepartmentCommand>,
        products_query: Arc<dyn ProductQuery>,
        products: Arc<dyn ProductCommand>,
    ) -> Self {
        Self {
            departments_query,
            departments,
            products_query,
            products,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Fixture-backed state for handler tests.

    use super::*;
    use crate::domain::ports::{
        FixtureDepartmentCommand, FixtureDepartmentQuery, FixtureProductCommand,
        FixtureProductQuery,
    };

    pub(crate) fn fixture_state() -> HttpState {
        HttpState::new(
            Arc::new(FixtureDepartmentQuery),
            Arc::new(FixtureDepartmentCommand),
            Arc::new(FixtureProductQuery),
            Arc::new(FixtureProductCommand),
        )
    }
}
