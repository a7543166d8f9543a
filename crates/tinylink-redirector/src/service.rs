use std::sync::Arc;

use crate::redirector::Redirector;
use async_trait::async_trait;
use tinylink_core::{Clock, Mapping, ReadMappingStore, ShortId, SystemClock};
use tracing::{debug, trace};

/// Service for resolving short ids.
///
/// Uses a read-only store to fetch mappings and re-checks expiry itself,
/// since a store may still hold a record its TTL has already passed.
/// Resolving never writes, so expiry is never extended.
#[derive(Debug)]
pub struct RedirectorService<R, C = SystemClock> {
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for RedirectorService<R, C> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R: ReadMappingStore> RedirectorService<R, SystemClock> {
    /// Creates a new RedirectorService with the given repository.
    pub fn new(repository: R) -> Self {
        Self::with_clock(repository, SystemClock)
    }
}

impl<R: ReadMappingStore, C: Clock> RedirectorService<R, C> {
    /// Creates a service that judges expiry by `clock`.
    pub fn with_clock(repository: R, clock: C) -> Self {
        Self {
            repository: Arc::new(repository),
            clock: Arc::new(clock),
        }
    }

    /// Resolves a raw, untrusted id such as a request path segment.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(mapping))` - The live mapping
    /// * `Ok(None)` - If the id doesn't exist or has expired
    /// * `Err(InvalidShortId)` - If `raw` cannot be a short id
    /// * `Err(Storage)` - If there was an error accessing the repository
    pub async fn resolve_str(&self, raw: &str) -> crate::Result<Option<Mapping>> {
        let id = ShortId::new(raw)?;
        Redirector::resolve(self, &id).await
    }
}

#[async_trait]
impl<R: ReadMappingStore, C: Clock> Redirector for RedirectorService<R, C> {
    async fn resolve(&self, id: &ShortId) -> crate::Result<Option<Mapping>> {
        trace!(short_id = %id, "resolving short id");

        match self.repository.get(id).await? {
            Some(mapping) if mapping.is_expired_at(self.clock.now()) => {
                debug!(short_id = %id, expires_at = %mapping.expires_at(), "mapping has expired");
                Ok(None)
            }
            Some(mapping) => {
                debug!(short_id = %id, long_url = %mapping.long_url(), "resolved short id");
                Ok(Some(mapping))
            }
            None => {
                trace!(short_id = %id, "short id not found");
                Ok(None)
            }
        }
    }
}
