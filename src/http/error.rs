//! HTTP-facing error type.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::routing::RoutingError;
use crate::store::StoreError;

/// Errors an action handler can end in.
///
/// Implements [`IntoResponse`] so every failure becomes a plain status line
/// body. Details are logged, never sent to the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No route, or the addressed annotation does not exist.
    #[error("Not Found")]
    NotFound,

    /// The request parameters or payload could not be used.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// `format` was something other than `json`.
    #[error("Unknown format: {0}")]
    UnsupportedFormat(String),

    /// The store failed to carry out the operation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// URL generation failed while building a response.
    #[error(transparent)]
    Routing(#[from] RoutingError),

    /// A response could not be built.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            ApiError::BadRequest(reason) => {
                tracing::debug!(reason = %reason, "Bad request");
                (StatusCode::BAD_REQUEST, "Bad Request").into_response()
            }
            ApiError::UnsupportedFormat(format) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Unknown format: {}", format),
            )
                .into_response(),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            ApiError::Routing(err) => {
                tracing::error!(error = %err, "URL generation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
            ApiError::Internal(reason) => {
                tracing::error!(reason = %reason, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("x".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnsupportedFormat("xml".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Store(StoreError::Persistence("disk".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
