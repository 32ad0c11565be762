//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → matcher.rs (segment comparison, most specific route first)
//!     → Return: RouteMatch { action, params } or no match
//!
//! Reverse direction (Location headers, clients):
//!     (action | route name, params, method hint)
//!     → generator.rs
//!     → canonical path (+ query string for unconsumed params)
//!
//! Route Compilation (at startup):
//!     mount point + (singular, plural)
//!     → router.rs (fixed route set, sorted by specificity)
//!     → Freeze as immutable ResourceRouter
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex in hot path (segment comparison only)
//! - Deterministic: same input always matches same route
//! - Matching and generation are pure; no I/O, no locking

pub mod action;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod router;

pub use action::Action;
pub use error::RoutingError;
pub use matcher::RouteMatch;
pub use router::{ResourceRouter, Route, RouteParams, Segment};
