//! Error handling module for the invitation backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and response bodies.

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
#[allow(dead_code)]
pub mod codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const FORMAT_ERROR: &str = "FORMAT_ERROR";
    pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
    pub const TRANSIENT_FAILURE: &str = "TRANSIENT_FAILURE";
    pub const DATABASE_ERROR: &str = "DATABASE_ERROR";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Per-field validation messages, ordered by field name.
pub type FieldErrors = BTreeMap<String, String>;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Admin gate rejected the passphrase
    Unauthorized(String),
    /// Schema validation failure with per-field messages
    Validation {
        message: String,
        errors: FieldErrors,
    },
    /// Malformed embedded photo payload
    Format(String),
    /// Table or bucket missing, or a write rejected by access policy
    StorageUnavailable(String),
    /// Remote call failed (network or server-side)
    Transient(String),
    /// Database error
    Database(String),
    /// Internal server error
    Internal(String),
}

impl AppError {
    /// Build a validation error from a field→message map.
    pub fn validation(message: impl Into<String>, errors: FieldErrors) -> Self {
        AppError::Validation {
            message: message.into(),
            errors,
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Format(_) => StatusCode::BAD_REQUEST,
            AppError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Transient(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Unauthorized(_) => codes::UNAUTHORIZED,
            AppError::Validation { .. } => codes::VALIDATION_ERROR,
            AppError::Format(_) => codes::FORMAT_ERROR,
            AppError::StorageUnavailable(_) => codes::STORAGE_UNAVAILABLE,
            AppError::Transient(_) => codes::TRANSIENT_FAILURE,
            AppError::Database(_) => codes::DATABASE_ERROR,
            AppError::Internal(_) => codes::INTERNAL_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(msg) => msg.clone(),
            AppError::Validation { message, .. } => message.clone(),
            AppError::Format(msg) => msg.clone(),
            AppError::StorageUnavailable(msg) => msg.clone(),
            AppError::Transient(msg) => msg.clone(),
            AppError::Database(msg) => msg.clone(),
            AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Internal(format!("JSON error: {}", err))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transient(format!("Request failed: {}", err))
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn new(error: &AppError) -> Self {
        let errors = match error {
            AppError::Validation { errors, .. } => Some(errors.clone()),
            _ => None,
        };

        Self {
            message: error.message(),
            errors,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody::new(&self);
        (status, Json(body)).into_response()
    }
}
