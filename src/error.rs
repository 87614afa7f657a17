// HTTP API Error Types
use axum::{extract::rejection::BytesRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use thiserror::Error;

use crate::database::DatabaseError;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Every failure a request can end in. Rendered as `{"error": message}`.
#[derive(Debug, Error)]
pub enum ApiError {
    // 401 Unauthorized
    #[error("{0}")]
    Unauthorized(String),

    // 404 Not Found
    #[error("{0}")]
    NotFound(String),

    // 500 Internal Server Error: storage failures, unparsable bodies, panics
    #[error("{0}")]
    Internal(String),

    // Any other status; 400 unless stated
    #[error("{message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Status { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::NotFound(msg)
            | ApiError::Internal(msg)
            | ApiError::Status { message: msg, .. } => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({ "error": self.message() })
    }
}

impl ApiError {
    /// Error response with the default 400 status.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_status(message, StatusCode::BAD_REQUEST)
    }

    pub fn with_status(message: impl Into<String>, status: StatusCode) -> Self {
        let message = message.into();
        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized(message)
        } else if status == StatusCode::NOT_FOUND {
            ApiError::NotFound(message)
        } else if status == StatusCode::INTERNAL_SERVER_ERROR {
            ApiError::Internal(message)
        } else {
            ApiError::Status { status, message }
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string())
    }

    pub fn route_not_found() -> Self {
        ApiError::NotFound(ROUTE_NOT_FOUND_MESSAGE.to_string())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Database error: {}", err);
        ApiError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Invalid request body: {}", err);
        ApiError::internal(err.to_string())
    }
}

// Bodies that cannot be buffered (over the size limit, aborted) fail like unparsable ones
impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        tracing::error!("Unreadable request body: {}", rejection.body_text());
        ApiError::internal(rejection.body_text())
    }
}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
