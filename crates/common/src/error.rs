//! Error types for lokamap.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Application result type.
pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // === Client Errors ===
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Link expired or signature invalid")]
    InvalidSignature,

    // === Server Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Build a single field-level validation error.
    #[must_use]
    pub fn validation(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        let mut error = ValidationError::new(code);
        error.message = Some(message.into());
        errors.add(field.into(), error);
        Self::Validation(errors)
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            // 4xx Client Errors
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) | Self::InvalidSignature => StatusCode::FORBIDDEN,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,

            // 5xx Server Errors
            Self::Database(_) | Self::Storage(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns whether this error should be logged at error level.
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = code, "Client error occurred");
        }

        // Validation failures carry a field-by-field error map.
        let body = match &self {
            Self::Validation(errors) => Json(json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                    "fields": errors,
                }
            })),
            _ => Json(json!({
                "error": {
                    "code": code,
                    "message": self.to_string(),
                }
            })),
        };

        (status, body).into_response()
    }
}

// === From implementations ===

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            AppError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::validation("contact", "pattern", "invalid").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Storage("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_error_carries_field() {
        let err = AppError::validation("student_id", "length", "too long");
        let AppError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        assert!(errors.field_errors().contains_key("student_id"));
    }
}
