//! Wiring-time routing errors.
//!
//! These are programmer errors raised to the caller. They never become an
//! HTTP status; an unmatched request is an `Option::None`, not an error.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    /// The mount point or resource name cannot produce a route table.
    #[error("invalid route configuration: {0}")]
    Configuration(String),

    /// No route can produce a URL for the requested action and parameters.
    #[error("no route: {0}")]
    NoRoute(String),
}
