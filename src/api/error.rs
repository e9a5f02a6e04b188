//! Mapping of catalog errors onto HTTP responses.

use crate::errors::Error;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Catalog error returned from a handler
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

/// HTTP status for a catalog error
#[must_use]
pub fn api_error_status(err: &Error) -> StatusCode {
    match err {
        e if e.is_not_found() => StatusCode::NOT_FOUND,
        Error::Validation { .. } | Error::InvalidPrice { .. } | Error::ValueTypeMismatch { .. } => {
            StatusCode::BAD_REQUEST
        }
        Error::DuplicateSku { .. } | Error::ProtectedPropertyObject { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = api_error_status(&self.0);
        let detail = match status {
            StatusCode::NOT_FOUND => "Not found.".to_string(),
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("Request failed: {}", self.0);
                "Internal server error.".to_string()
            }
            _ => self.0.to_string(),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
