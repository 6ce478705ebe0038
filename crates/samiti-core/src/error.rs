//! Error types module
//!
//! This module provides the core error types used throughout the samiti
//! application. All errors are unified under the `AppError` enum which can
//! represent ingestion, storage, validation, and database errors.
//!
//! The `Database` variant and `From<sqlx::Error>` are gated behind the `sqlx`
//! feature so leaf crates can depend on samiti-core without pulling in sqlx.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like duplicate submissions
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Underlying detail surfaced on server-fault responses, absent otherwise
    fn detail(&self) -> Option<String>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Multipart ingestion error: {0}")]
    Ingestion(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::MethodNotAllowed => 405,
            AppError::Conflict(_) => 409,
            AppError::Database(_)
            | AppError::Ingestion(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => 500,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::MethodNotAllowed => "Method Not Allowed".to_string(),
            AppError::Conflict(msg) => msg.clone(),
            AppError::Database(_)
            | AppError::Ingestion(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => "Server error".to_string(),
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            AppError::InvalidInput(_) | AppError::MethodNotAllowed | AppError::Conflict(_) => None,
            AppError::Database(err) => Some(err.to_string()),
            AppError::Ingestion(msg) | AppError::Storage(msg) | AppError::Internal(msg) => {
                Some(msg.clone())
            }
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) | AppError::MethodNotAllowed => LogLevel::Debug,
            AppError::Conflict(_) => LogLevel::Warn,
            AppError::Database(_)
            | AppError::Ingestion(_)
            | AppError::Storage(_)
            | AppError::Internal(_) => LogLevel::Error,
        }
    }
}
