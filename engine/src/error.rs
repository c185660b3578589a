//! Error types for the cadastro engine.

use crate::MAX_AGE;
use thiserror::Error;

/// All possible errors from the cadastro engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    // Validation errors
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("age is not a number: {0}")]
    InvalidAge(String),

    #[error("age must be between 0 and {max}, got {0}", max = MAX_AGE)]
    AgeOutOfRange(i64),

    // State errors
    #[error("a request is already in progress")]
    Busy,
}

impl Error {
    /// Whether this error came from form validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_) | Error::InvalidAge(_) | Error::AgeOutOfRange(_)
        )
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
