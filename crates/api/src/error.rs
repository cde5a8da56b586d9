use std::fmt::Display;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failure of an API request, rendered as `{"error": "..."}`.
///
/// Internal causes are logged where they happen and never reach the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    BadRequest,
    NotFound,
    Internal(&'static str),
}

impl ApiError {
    #[must_use]
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ApiError::BadRequest => "Invalid request body",
            ApiError::NotFound => "Lesson not found",
            ApiError::Internal(message) => message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.message() }))).into_response()
    }
}

/// Log `err` and replace it with a generic 500.
pub(crate) fn internal<E: Display>(message: &'static str) -> impl FnOnce(E) -> ApiError {
    move |err| {
        log::error!("{message}: {err}");
        ApiError::Internal(message)
    }
}
