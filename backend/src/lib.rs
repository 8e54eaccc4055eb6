//! Grocery inventory backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Request-trace middleware re-exported for app assembly.
pub use middleware::Trace;
