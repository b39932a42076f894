use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the domain, service and storage layers.
#[derive(Error, Debug)]
pub enum SpendError {
    /// A required field was missing or empty. Nothing was mutated.
    #[error("{0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// A persisted record could not be decoded.
    #[error("Corrupt record `{key}`: {reason}")]
    CorruptState { key: String, reason: String },
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Persistence error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, SpendError>;

impl SpendError {
    pub fn validation(message: impl Into<String>) -> Self {
        SpendError::Validation(message.into())
    }

    /// Whether the failure is the user's to fix (shown as a notice, not logged as a fault).
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SpendError::Validation(_) | SpendError::InvalidOperation(_))
    }
}

impl From<std::io::Error> for SpendError {
    fn from(err: std::io::Error) -> Self {
        SpendError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SpendError {
    fn from(err: serde_json::Error) -> Self {
        SpendError::Storage(err.to_string())
    }
}
