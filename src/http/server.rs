//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum app with a single dispatching handler
//! - Wire up middleware (CORS headers, request ID, tracing, timeout)
//! - Check the requested format, match the route, invoke the action handler
//! - Bind server to listener and shut down gracefully

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderName, HeaderValue, Request},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::error::{ApiError, ApiResult};
use crate::http::handlers::{self, RequestContext};
use crate::http::request::{request_id, Params, X_REQUEST_ID};
use crate::http::response::{strip_no_content, CORS_HEADERS};
use crate::routing::{ResourceRouter, RoutingError};
use crate::store::AnnotationStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ResourceRouter>,
    pub store: Arc<dyn AnnotationStore>,
    pub config: Arc<AppConfig>,
}

/// HTTP server for the annotation store.
pub struct HttpServer {
    app: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and store.
    ///
    /// Fails if the configured mount point or resource name cannot produce
    /// a route table.
    pub fn new(config: AppConfig, store: Arc<dyn AnnotationStore>) -> Result<Self, RoutingError> {
        let router = Arc::new(ResourceRouter::from_config(&config.resource)?);

        let state = AppState {
            router,
            store,
            config: Arc::new(config.clone()),
        };

        let app = Self::build_router(&config, state.clone());
        Ok(Self { app, config, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let request_id_header = HeaderName::from_static(X_REQUEST_ID);
        let [origin, expose, methods, max_age] = CORS_HEADERS.map(|(name, value)| {
            SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
        });

        let middleware = ServiceBuilder::new()
            .layer(origin)
            .layer(expose)
            .layer(methods)
            .layer(max_age)
            .layer(SetRequestIdLayer::new(request_id_header.clone(), MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(request_id_header))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)));

        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(middleware)
    }

    /// The fully layered app, for in-process use.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Shared state the handlers see.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_point = %self.config.resource.mount_point,
            resource = %self.config.resource.plural,
            "HTTP server starting"
        );

        axum::serve(listener, self.app.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Single entry point for every request.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request_id(request.headers()).to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = match handle(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            if matches!(err, ApiError::NotFound) {
                tracing::debug!(request_id = %request_id, method = %method, path = %path, "Not found");
            }
            err.into_response()
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        "Request handled"
    );
    strip_no_content(response)
}

async fn handle(state: &AppState, request: Request<Body>) -> ApiResult<Response> {
    let (parts, body) = request.into_parts();
    let mut params = Params::from_query(parts.uri.query());

    let content_type = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let body: Bytes = axum::body::to_bytes(body, state.config.limits.max_body_size)
        .await
        .map_err(|e| ApiError::BadRequest(format!("unreadable body: {}", e)))?;

    let mut json_body = None;
    if content_type.starts_with("application/x-www-form-urlencoded") {
        params.extend_form(&body);
    } else if content_type.starts_with("application/json") && !body.is_empty() {
        json_body = Some(body);
    }

    let format = params.get("format").unwrap_or("json");
    if format != "json" {
        return Err(ApiError::UnsupportedFormat(format.to_string()));
    }

    let route = state
        .router
        .match_route(&parts.method, parts.uri.path())
        .ok_or_else(|| {
            tracing::warn!(method = %parts.method, path = %parts.uri.path(), "No route matched");
            ApiError::NotFound
        })?;

    tracing::debug!(action = %route.action, id = ?route.id(), "Route matched");

    let ctx = RequestContext {
        route,
        params,
        json_body,
    };
    handlers::dispatch(state, &ctx)
}
