//! Request handling.
//!
//! # Responsibilities
//! - Read the request ID set by the middleware for log correlation
//! - Collect request parameters from the query string and urlencoded forms
//!
//! # Design Decisions
//! - Parameters keep their arrival order; for repeated keys the last value wins
//! - Parameter extraction is independent of the matched route

use axum::http::HeaderMap;
use serde_json::Value;
use url::form_urlencoded;

use crate::store::Fields;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID, or `"unknown"` when the header is missing.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Flat request parameters (`request.params` in form-handling terms).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// Parse a raw query string. `None` yields no parameters.
    pub fn from_query(query: Option<&str>) -> Self {
        let pairs = query
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { pairs }
    }

    /// Append fields from an `application/x-www-form-urlencoded` body.
    pub fn extend_form(&mut self, body: &[u8]) {
        self.pairs
            .extend(form_urlencoded::parse(body).into_owned());
    }

    /// Last value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// One `(key, value)` per distinct key, in first-seen key order, using
    /// the last value. Keys in `exclude` are skipped.
    pub fn latest(&self, exclude: &[&str]) -> Vec<(String, String)> {
        let mut out: Vec<(String, String)> = Vec::new();
        for (key, value) in &self.pairs {
            if exclude.contains(&key.as_str()) {
                continue;
            }
            match out.iter_mut().find(|(k, _)| k == key) {
                Some(slot) => slot.1 = value.clone(),
                None => out.push((key.clone(), value.clone())),
            }
        }
        out
    }

    /// Parameters as entity fields (string values).
    pub fn to_fields(&self, exclude: &[&str]) -> Fields {
        self.latest(exclude)
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect()
    }
}
