//! The storage interface the HTTP actions call into.
//!
//! The store owns identifiers and persistence. The HTTP layer only decides
//! which capability to call and how to render the outcome.

use serde::Serialize;
use serde_json::Value;

use crate::store::model::{Annotation, Fields};

/// Failures reported by a store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The underlying commit failed. The message is logged, never returned
    /// to clients.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Parameters of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Exact-match `(field, value)` filters, all of which must hold.
    pub filters: Vec<(String, String)>,
    pub offset: usize,
    /// `None` means unbounded.
    pub limit: Option<usize>,
    /// Return full entities instead of `{"id": ...}` summaries.
    pub all_fields: bool,
}

/// Search response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    /// Number of matching entities before `offset`/`limit` are applied.
    pub total: usize,
    pub results: Vec<Value>,
}

/// Annotation persistence.
///
/// Implementations must be shareable across request tasks.
pub trait AnnotationStore: Send + Sync + 'static {
    /// Up to `limit` annotations in insertion order.
    fn index(&self, limit: usize) -> StoreResult<Vec<Annotation>>;

    /// Look up one annotation.
    fn show(&self, id: &str) -> StoreResult<Option<Annotation>>;

    /// Store a new annotation under a freshly assigned id.
    fn create(&self, fields: Fields) -> StoreResult<Annotation>;

    /// Merge `fields` into an existing annotation. `Ok(None)` if absent.
    fn update(&self, id: &str, fields: Fields) -> StoreResult<Option<Annotation>>;

    /// Remove an annotation. `Ok(false)` if absent.
    fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Filtered, paginated listing.
    fn search(&self, query: &SearchQuery) -> StoreResult<SearchResults>;
}
