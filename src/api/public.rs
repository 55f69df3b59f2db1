//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

use crate::rsvp::LookupError;

// Errors

/// Error returned by every handler. Renders as `{"error": "<message>"}`
/// with the given status code.
pub struct ApiError {
    pub status: StatusCode,
    pub error: anyhow::Error,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<anyhow::Error>) -> Self {
        Self {
            status,
            error: error.into(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, anyhow::anyhow!(message.to_string()))
    }

    /// Lookup failures map onto 400, 404 and 500
    pub fn from_lookup(err: LookupError) -> Self {
        let status = match err {
            LookupError::InvalidPin(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound => StatusCode::NOT_FOUND,
            LookupError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err)
    }
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!("{:#}", self.error);
        } else {
            tracing::warn!("{} {}", self.status, self.error);
        }

        (self.status, Json(json!({ "error": self.error.to_string() }))).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into a 500
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }
}

// Re-export public types shared with API clients

pub mod rsvp {
    pub use crate::api::routes::rsvp::public::*;
}
