use std::io;
use thiserror::Error;

/// Application-wide error type for the fallible edges of the engine.
///
/// The reply pipeline itself is total; errors only arise while loading
/// configuration, parsing labels supplied by callers, or talking to the
/// chat service actor.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors (e.g., reading a config file).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Represents configuration-related errors (e.g., malformed environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents data validation errors (e.g., an unknown intent label).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents failures talking to the chat service actor.
    #[error("Service error: {0}")]
    Service(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        match self {
            AppError::Io(e) => AppError::Io(io::Error::new(e.kind(), e.to_string())),
            AppError::Config(s) => AppError::Config(s.clone()),
            AppError::Validation(s) => AppError::Validation(s.clone()),
            AppError::Service(s) => AppError::Service(s.clone()),
            AppError::Timeout(s) => AppError::Timeout(s.clone()),
            AppError::Internal(s) => AppError::Internal(s.clone()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Config(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
