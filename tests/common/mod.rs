//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use annotator_store::config::AppConfig;
use annotator_store::store::{
    Annotation, AnnotationStore, Fields, InMemoryStore, SearchQuery, SearchResults, StoreError,
    StoreResult,
};
use annotator_store::HttpServer;

pub const MOUNT: &str = "/.annotation-xyz";

/// Config with the resource mounted at [`MOUNT`] as `foobar`/`foobars`.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.resource.mount_point = MOUNT.to_string();
    config.resource.singular = "foobar".to_string();
    config.resource.plural = "foobars".to_string();
    config
}

/// App over a fresh in-memory store. The store is returned for seeding.
pub fn test_app() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let server = HttpServer::new(test_config(), store.clone()).unwrap();
    (server.app(), store)
}

/// App over an arbitrary store.
pub fn app_with_store(store: Arc<dyn AnnotationStore>) -> Router {
    HttpServer::new(test_config(), store).unwrap().app()
}

/// `{MOUNT}/foobars{suffix}`
pub fn url(suffix: &str) -> String {
    format!("{}/foobars{}", MOUNT, suffix)
}

pub async fn send(app: &Router, method: Method, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_form(app: &Router, method: Method, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn send_json(app: &Router, method: Method, uri: &str, json: &Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> Value {
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {}", other),
    }
}

/// Delegates to an in-memory store but fails every delete.
#[derive(Default)]
pub struct FailingDeleteStore {
    inner: InMemoryStore,
}

impl AnnotationStore for FailingDeleteStore {
    fn index(&self, limit: usize) -> StoreResult<Vec<Annotation>> {
        self.inner.index(limit)
    }

    fn show(&self, id: &str) -> StoreResult<Option<Annotation>> {
        self.inner.show(id)
    }

    fn create(&self, fields: Fields) -> StoreResult<Annotation> {
        self.inner.create(fields)
    }

    fn update(&self, id: &str, fields: Fields) -> StoreResult<Option<Annotation>> {
        self.inner.update(id, fields)
    }

    fn delete(&self, _id: &str) -> StoreResult<bool> {
        Err(StoreError::Persistence("commit rejected".to_string()))
    }

    fn search(&self, query: &SearchQuery) -> StoreResult<SearchResults> {
        self.inner.search(query)
    }
}
