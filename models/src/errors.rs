// models/src/errors.rs

pub use thiserror::Error;

/// A validation error raised before a record is allowed into the pipeline.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A numeric field is NaN or infinite.
    #[error("field {0} must be a finite number")]
    NonFinite(&'static str),
    /// A numeric field lies outside its plausible physical range.
    #[error("field {field} is out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("unknown symptom '{0}'")]
    UnknownSymptom(String),
    #[error("unknown sex '{0}'")]
    UnknownSex(String),
    #[error("unknown activity level '{0}'")]
    UnknownActivityLevel(String),
    #[error("unknown risk level '{0}'")]
    UnknownRiskLevel(String),
    /// A required text field was blank.
    #[error("field {0} must not be empty")]
    Empty(&'static str),
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),
    #[error("password must be at least {0} characters long")]
    PasswordTooShort(usize),
}

/// A type alias for a `Result` that returns a `ValidationError` on failure.
pub type ValidationResult<T> = Result<T, ValidationError>;
