//! In-memory annotation store.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use serde_json::Value;
use uuid::Uuid;

use crate::store::model::{Annotation, Fields};
use crate::store::traits::{AnnotationStore, SearchQuery, SearchResults, StoreResult};

#[derive(Debug, Clone)]
struct Entry {
    /// Insertion sequence, for stable listing order.
    seq: u64,
    annotation: Annotation,
}

/// A thread-safe store keeping annotations in a `DashMap`.
///
/// Ids are UUID v4 strings. Listing order is insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: DashMap<String, Entry>,
    next_seq: AtomicU64,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored annotations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn snapshot(&self) -> Vec<Annotation> {
        let mut entries: Vec<Entry> = self.entries.iter().map(|r| r.value().clone()).collect();
        entries.sort_by_key(|e| e.seq);
        entries.into_iter().map(|e| e.annotation).collect()
    }
}

impl AnnotationStore for InMemoryStore {
    fn index(&self, limit: usize) -> StoreResult<Vec<Annotation>> {
        let mut all = self.snapshot();
        all.truncate(limit);
        Ok(all)
    }

    fn show(&self, id: &str) -> StoreResult<Option<Annotation>> {
        Ok(self.entries.get(id).map(|r| r.annotation.clone()))
    }

    fn create(&self, fields: Fields) -> StoreResult<Annotation> {
        let annotation = Annotation::new(Uuid::new_v4().to_string(), fields);
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.entries.insert(
            annotation.id.clone(),
            Entry {
                seq,
                annotation: annotation.clone(),
            },
        );
        tracing::debug!(id = %annotation.id, "Annotation created");
        Ok(annotation)
    }

    fn update(&self, id: &str, fields: Fields) -> StoreResult<Option<Annotation>> {
        Ok(self.entries.get_mut(id).map(|mut entry| {
            entry.annotation.merge(fields);
            entry.annotation.clone()
        }))
    }

    fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.entries.remove(id).is_some())
    }

    fn search(&self, query: &SearchQuery) -> StoreResult<SearchResults> {
        let matching: Vec<Annotation> = self
            .snapshot()
            .into_iter()
            .filter(|a| query.filters.iter().all(|(k, v)| a.matches(k, v)))
            .collect();

        let total = matching.len();
        let page = matching
            .iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX));
        let results: Vec<Value> = if query.all_fields {
            page.map(Annotation::as_value).collect()
        } else {
            page.map(Annotation::summary).collect()
        };

        Ok(SearchResults { total, results })
    }
}
