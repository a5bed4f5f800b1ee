//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A requested record (story, theme, storage key) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A validation error in domain logic or at a content boundary.
    #[error("validation error: {0}")]
    Validation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        Self::Infrastructure(err.to_string())
    }
}
