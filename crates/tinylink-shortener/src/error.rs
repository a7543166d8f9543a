use thiserror::Error;
use tinylink_core::{CoreError, StorageError};

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    /// A generated id or the computed expiry could not form a mapping, for
    /// example when `created_at + ttl` leaves the representable range.
    #[error("mapping cannot be built: {0}")]
    Mapping(#[source] CoreError),
    #[error("no free short id after {attempts} attempts")]
    CollisionRetriesExhausted { attempts: u32 },
    #[error("storage error: {0}")]
    Storage(
        #[from]
        #[source]
        StorageError,
    ),
}

impl ShortenerError {
    /// Returns `true` when the caller sent bad input. Everything else is a
    /// server-side failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ShortenerError::InvalidUrl(_))
    }
}

impl From<CoreError> for ShortenerError {
    fn from(value: CoreError) -> Self {
        match value {
            CoreError::InvalidUrl(message) => Self::InvalidUrl(message),
            other => Self::Mapping(other),
        }
    }
}
