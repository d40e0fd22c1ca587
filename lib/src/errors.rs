// lib/src/errors.rs

use thiserror::Error;

use models::ValidationError;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Invalid input or data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Sled error: {0}")]
    Sled(#[from] sled::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Already Exists: {0}")]
    AlreadyExists(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Reasoning service error: {0}")]
    ReasoningError(String),

    #[error("Malformed reasoning response: {0}")]
    MalformedResponse(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for AssessmentError {
    fn from(err: config::ConfigError) -> Self {
        AssessmentError::ConfigurationError(err.to_string())
    }
}

/// A type alias for a `Result` that returns an `AssessmentError` on failure.
pub type Result<T> = std::result::Result<T, AssessmentError>;
