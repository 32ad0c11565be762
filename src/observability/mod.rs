//! Observability.
//!
//! Structured logging through `tracing`. Every request carries an
//! `x-request-id` that handlers include in their log events.

pub mod logging;

pub use logging::init as init_logging;
