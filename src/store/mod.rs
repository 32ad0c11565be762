//! Annotation storage subsystem.
//!
//! # Data Flow
//! ```text
//! http handlers (index/show/create/update/delete/search)
//!     → traits.rs (AnnotationStore capability)
//!     → memory.rs (DashMap-backed implementation)
//!     → model.rs (Annotation ↔ flat JSON object)
//! ```
//!
//! # Design Decisions
//! - The store assigns ids; clients never choose them
//! - `Ok(None)` / `Ok(false)` signal absence; `Err` is reserved for failures
//! - Implementations are `Send + Sync` and shared through `Arc<dyn ...>`

pub mod memory;
pub mod model;
pub mod traits;

pub use memory::InMemoryStore;
pub use model::{Annotation, Fields};
pub use traits::{AnnotationStore, SearchQuery, SearchResults, StoreError, StoreResult};
