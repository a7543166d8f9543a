use thiserror::Error;

/// Errors raised while constructing core value types.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid short id: {0}")]
    InvalidShortId(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid ttl: {0}")]
    InvalidTtl(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("short id already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

impl StorageError {
    /// Returns `true` for failures a caller may reasonably retry.
    ///
    /// A conflict is excluded: it is resolved by picking another id, not by
    /// repeating the same write.
    pub fn is_transient(&self) -> bool {
        matches!(self, StorageError::Unavailable(_) | StorageError::Timeout(_))
    }
}
