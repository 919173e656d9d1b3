//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the Coachbook API.
//! It maps domain errors to HTTP status codes and JSON error responses, so every
//! handler reports failures the same way.
//!
//! Database and internal errors are logged with their full chain and answered
//! with a generic message; their details never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coachbook_core::errors::CoachError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// `AppError` wraps `CoachError` instances and implements `IntoResponse`
/// to convert them into HTTP responses.
///
/// # Example
///
/// ```
/// use axum::Json;
/// use coachbook_api::middleware::error_handling::AppError;
/// use coachbook_core::errors::CoachError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(AppError(CoachError::Validation("Name is required".into())));
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub CoachError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CoachError::NotFound(_) => StatusCode::NOT_FOUND,
            CoachError::Validation(_) => StatusCode::BAD_REQUEST,
            CoachError::Conflict(_) => StatusCode::CONFLICT,
            CoachError::Authentication(_) => StatusCode::UNAUTHORIZED,
            CoachError::Authorization(_) => StatusCode::FORBIDDEN,
            CoachError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CoachError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match &self.0 {
            CoachError::Database(report) => {
                tracing::error!("Database error: {:?}", report);
                "Internal server error".to_string()
            }
            CoachError::Internal(err) => {
                tracing::error!("Internal error: {}", err);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Automatic conversion from CoachError to AppError
impl From<CoachError> for AppError {
    fn from(err: CoachError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError
///
/// It wraps the eyre error in a CoachError::Database variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(CoachError::Database(err))
    }
}

/// Maps a CoachError to an HTTP response
pub fn map_error(err: CoachError) -> Response {
    AppError(err).into_response()
}
