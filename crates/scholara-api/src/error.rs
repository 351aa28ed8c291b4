//! Mapping of domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use scholara_core::error::ScholaraError;
use serde::Serialize;
use tracing::error;

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    /// Underlying cause, only exposed on server errors.
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            error: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Map a domain error. Client errors get fixed messages; anything
    /// else becomes a 500 carrying `context` and the error text.
    pub fn from_domain(err: ScholaraError, context: &str) -> Self {
        match err {
            ScholaraError::NotFound { ref entity, .. } => {
                let message = match entity.as_str() {
                    "scholarship" => "Scholarship not found".to_string(),
                    "user_profile" => "User not found".to_string(),
                    _ => err.to_string(),
                };
                Self::new(StatusCode::NOT_FOUND, message)
            }
            ScholaraError::Expired { .. } => {
                Self::new(StatusCode::NOT_FOUND, "This scholarship has expired")
            }
            ScholaraError::AlreadyExists { .. } => Self::bad_request("User already exists"),
            ScholaraError::AuthenticationFailed { .. } => Self::bad_request("Invalid credentials"),
            ScholaraError::Validation { message } => Self::bad_request(message),
            ScholaraError::Database(_) | ScholaraError::Crypto(_) => {
                error!(error = %err, context, "Request failed");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: context.to_string(),
                    error: Some(err.to_string()),
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.message,
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}
