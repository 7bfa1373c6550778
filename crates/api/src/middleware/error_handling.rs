//! # Error Handling Middleware
//!
//! Maps the domain error taxonomy to HTTP status codes and JSON error
//! responses so every endpoint fails the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use whenwhere_core::errors::EventError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `EventError` instances and implements
/// `IntoResponse` to convert them into HTTP responses with appropriate
/// status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub EventError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            EventError::NotFound(_) => StatusCode::NOT_FOUND,
            EventError::Validation(_) => StatusCode::BAD_REQUEST,
            EventError::Authentication(_) => StatusCode::UNAUTHORIZED,
            EventError::Authorization(_) => StatusCode::FORBIDDEN,
            EventError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            EventError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on functions returning `Result<T, EventError>` inside
/// handlers returning `Result<T, AppError>`.
impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        AppError(err)
    }
}

/// Wraps raw repository errors into the database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(EventError::Database(err))
    }
}
