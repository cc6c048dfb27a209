//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::MSG_INVALID_CREDENTIALS;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input
    #[error("{0}")]
    Validation(String),

    #[error("{0} already exists")]
    Conflict(String),

    // Authentication
    #[error("Invalid credentials")]
    InvalidCredentials,

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Token signing error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Startup
    #[error("Configuration error: {0}")]
    Config(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Coarse error classification, independent of the HTTP framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    Authentication,
    Storage,
    Internal,
}

impl ErrorKind {
    /// HTTP status code for this kind of failure. Conflicts map to 400.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::Validation | ErrorKind::Conflict => 400,
            ErrorKind::Authentication => 401,
            ErrorKind::Storage | ErrorKind::Internal => 500,
        }
    }

    /// Whether the failure is an incident worth logging server-side.
    pub fn is_incident(self) -> bool {
        matches!(self, ErrorKind::Storage | ErrorKind::Internal)
    }
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
    code: &'static str,
}

impl AppError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::Conflict(_) => ErrorKind::Conflict,
            AppError::InvalidCredentials => ErrorKind::Authentication,
            AppError::Database(_) => ErrorKind::Storage,
            AppError::Jwt(_) | AppError::Config(_) | AppError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Conflict(_) => "CONFLICT",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) | AppError::Config(_) | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Conflict(_) => self.to_string(),
            AppError::InvalidCredentials => MSG_INVALID_CREDENTIALS.to_string(),
            AppError::Database(_) | AppError::Jwt(_) | AppError::Config(_) | AppError::Internal(_) => {
                "Server error".to_string()
            }
        }
    }

    /// Emit the server-side record for incidents; client errors stay quiet.
    fn log(&self) {
        match self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Jwt(e) => tracing::error!("JWT error: {:?}", e),
            AppError::Config(msg) => tracing::error!("Configuration error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind().is_incident() {
            self.log();
        }

        let body = ErrorResponse {
            message: self.user_message(),
            code: self.code(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn conflict(entity: impl Into<String>) -> Self {
        AppError::Conflict(entity.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        AppError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
