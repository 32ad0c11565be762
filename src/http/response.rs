//! Response rendering.
//!
//! # Responsibilities
//! - Render JSON bodies, or JSONP when a callback is requested
//! - Build the bodiless responses (204, 303 with `Location`)
//! - Define the static CORS header set attached to every response
//!
//! # Design Decisions
//! - 204 responses never carry a content type
//! - JSONP callbacks are restricted to identifier paths

use axum::http::header::{self, HeaderName, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::http::error::{ApiError, ApiResult};

/// Fixed CORS policy, identical for every response.
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_EXPOSE_HEADERS, "Location"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE"),
    (header::ACCESS_CONTROL_MAX_AGE, "86400"),
];

const JSON: &str = "application/json";
const JAVASCRIPT: &str = "text/javascript";

/// Serialize `body` as JSON, wrapped as `callback(...);` when a callback is
/// given.
pub fn render_json<T: Serialize>(body: &T, callback: Option<&str>) -> ApiResult<Response> {
    let json = serde_json::to_string(body)
        .map_err(|e| ApiError::Internal(format!("unserializable body: {}", e)))?;

    match callback {
        Some(callback) => {
            if !is_valid_callback(callback) {
                return Err(ApiError::BadRequest(format!(
                    "invalid JSONP callback '{}'",
                    callback
                )));
            }
            Ok((
                [(header::CONTENT_TYPE, JAVASCRIPT)],
                format!("{}({});", callback, json),
            )
                .into_response())
        }
        None => Ok(([(header::CONTENT_TYPE, JSON)], json).into_response()),
    }
}

/// 204 with no body and no content type.
pub fn no_content() -> Response {
    strip_no_content(StatusCode::NO_CONTENT.into_response())
}

/// 303 pointing at `location`.
pub fn see_other(location: &str) -> ApiResult<Response> {
    let value = HeaderValue::from_str(location)
        .map_err(|_| ApiError::Internal(format!("unusable location '{}'", location)))?;
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response())
}

/// Drop the content type from a 204; no body is permitted on one.
pub fn strip_no_content(mut response: Response) -> Response {
    if response.status() == StatusCode::NO_CONTENT {
        response.headers_mut().remove(header::CONTENT_TYPE);
    }
    response
}

/// `[A-Za-z_$][A-Za-z0-9_$.]*`
fn is_valid_callback(callback: &str) -> bool {
    let mut chars = callback.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.')
}
