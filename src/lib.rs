//! Annotation store HTTP service.
//!
//! Exposes one REST resource (annotations by default) under a configurable
//! mount point, backed by a pluggable [`store::AnnotationStore`].

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::ResourceRouter;
pub use store::{AnnotationStore, InMemoryStore};
