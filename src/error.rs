//! Application error type and its HTTP mapping.
//!
//! Every non-2xx response carries a JSON body with a top-level `message` and an
//! `error` object holding a machine-readable code plus free-form details:
//!
//! ```json
//! {
//!   "message": "Couldn't create shortened URL",
//!   "error": { "code": "internal_error", "details": { "reason": "..." } }
//! }
//! ```

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Errors surfaced by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No stored pair matches the request (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// A uniqueness rule was violated (409).
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Storage or other unexpected failure (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

/// Serializable error payload nested under `error` in responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    error: ErrorInfo,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Returns the HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Internal { .. } => "internal_error",
        }
    }

    /// Replaces the message of an internal error with an operation-level one.
    ///
    /// The previous message is kept under `details.cause`. Client errors
    /// (validation, not found, conflict) are returned unchanged.
    pub fn context(self, message: impl Into<String>) -> Self {
        match self {
            Self::Internal {
                message: cause,
                details,
            } => Self::Internal {
                message: message.into(),
                details: json!({ "cause": cause, "details": details }),
            },
            other => other,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let details = match self {
            Self::Validation { details, .. }
            | Self::NotFound { details, .. }
            | Self::Conflict { details, .. }
            | Self::Internal { details, .. } => details.clone(),
        };

        ErrorInfo {
            code: self.code(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_error_info();

        if status.is_server_error() {
            tracing::error!(code = error.code, details = %error.details, "{}", self);
        }

        let body = ErrorBody {
            message: self.to_string(),
            error,
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        AppError::bad_request("Invalid request", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}
