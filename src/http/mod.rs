//! HTTP protocol handling.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (middleware: CORS headers, request ID, trace, timeout)
//!     → request.rs (query + form parameters)
//!     → routing::ResourceRouter::match_route
//!     → handlers.rs (one function per action, talks to the store)
//!     → response.rs (JSON / JSONP / 204 / 303)
//!     → error.rs (failures as plain status responses)
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;

pub use error::{ApiError, ApiResult};
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
