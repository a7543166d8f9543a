use crate::error::StorageError;
use crate::mapping::Mapping;
use crate::shortcode::ShortId;
use async_trait::async_trait;
use std::sync::Arc;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// How a write treats an existing record at the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutMode {
    /// Fail with [`StorageError::Conflict`] if a live mapping holds the key.
    /// The check and the write happen atomically inside the store.
    IfAbsent,
    /// Replace whatever is stored at the key.
    Overwrite,
}

/// A read-only view of a mapping store.
///
/// This trait provides only the read operations from [`MappingStore`],
/// allowing the resolve flow to run with read-only access.
#[async_trait]
pub trait ReadMappingStore: Send + Sync + 'static {
    /// Retrieves the mapping for a given short id.
    /// Returns `None` if the id does not exist.
    ///
    /// Stores with passive expiry may still return a record past its
    /// `expires_at`; callers decide liveness.
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>>;
}

#[async_trait]
pub trait MappingStore: ReadMappingStore {
    /// Writes a mapping under its short id.
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()>;

    /// Deletes the mapping for a given short id.
    /// Returns `true` if the record existed and was removed.
    async fn delete(&self, id: &ShortId) -> Result<bool>;

    /// Removes records whose expiry has passed and returns how many went.
    ///
    /// Stores that reclaim expired keys on their own keep the default.
    async fn purge_expired(&self) -> Result<u64> {
        Ok(0)
    }
}

#[async_trait]
impl<S: ReadMappingStore + ?Sized> ReadMappingStore for Arc<S> {
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>> {
        (**self).get(id).await
    }
}

#[async_trait]
impl<S: MappingStore + ?Sized> MappingStore for Arc<S> {
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()> {
        (**self).put(mapping, mode).await
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        (**self).delete(id).await
    }

    async fn purge_expired(&self) -> Result<u64> {
        (**self).purge_expired().await
    }
}
