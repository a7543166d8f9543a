use thiserror::Error;
use tinylink_core::{CoreError, StorageError};

#[derive(Debug, Clone, Error)]
pub enum RedirectorError {
    #[error("short id is malformed: {0}")]
    InvalidShortId(String),
    #[error("storage operation failed: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

impl RedirectorError {
    /// Returns `true` when the caller sent bad input, as opposed to the
    /// store failing.
    pub fn is_validation(&self) -> bool {
        matches!(self, RedirectorError::InvalidShortId(_))
    }
}

impl From<CoreError> for RedirectorError {
    fn from(error: CoreError) -> Self {
        RedirectorError::InvalidShortId(error.to_string())
    }
}
