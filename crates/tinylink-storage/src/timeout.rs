use async_trait::async_trait;
use std::future::Future;
use std::time::Duration;
use tinylink_core::repository::{MappingStore, PutMode, ReadMappingStore, Result};
use tinylink_core::{Mapping, ShortId, StorageError};
use tracing::warn;

/// A store decorator that bounds every call with a deadline.
///
/// A call that misses the deadline fails with [`StorageError::Timeout`].
/// The decorator never retries; a timed-out write may or may not have
/// landed, and only the caller can decide whether to try again.
#[derive(Debug, Clone)]
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    async fn bounded<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result,
            Err(_) => {
                warn!(operation, timeout = ?self.timeout, "store call timed out");
                Err(StorageError::Timeout(format!(
                    "{} did not complete within {:?}",
                    operation, self.timeout
                )))
            }
        }
    }
}

#[async_trait]
impl<S: ReadMappingStore> ReadMappingStore for TimeoutStore<S> {
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>> {
        self.bounded("get", self.inner.get(id)).await
    }
}

#[async_trait]
impl<S: MappingStore> MappingStore for TimeoutStore<S> {
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()> {
        self.bounded("put", self.inner.put(mapping, mode)).await
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        self.bounded("delete", self.inner.delete(id)).await
    }

    async fn purge_expired(&self) -> Result<u64> {
        self.bounded("purge_expired", self.inner.purge_expired()).await
    }
}
