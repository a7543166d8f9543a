use crate::config::ShortenerConfig;
use crate::error::{Result, ShortenerError};
use crate::shortener::Shortener;
use async_trait::async_trait;
use std::sync::Arc;
use tinylink_core::{
    Clock, CreateRequest, LongUrl, Mapping, MappingStore, PutMode, ShortId, StorageError,
    SystemClock,
};
use tinylink_generator::Generator;
use tracing::{debug, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `MappingStore` and a `Generator` to handle:
/// - URL validation
/// - Id generation with bounded retry on collision
/// - Expiry computation
///
/// The store's conditional write is the only uniqueness check. A collision
/// is answered with a fresh id, never with a second read or an overwrite.
#[derive(Debug)]
pub struct ShortenerService<S, G, C = SystemClock> {
    store: Arc<S>,
    generator: Arc<G>,
    clock: Arc<C>,
    config: Arc<ShortenerConfig>,
}

impl<S, G, C> Clone for ShortenerService<S, G, C> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<S: MappingStore, G: Generator> ShortenerService<S, G, SystemClock> {
    pub fn new(store: S, generator: G, config: ShortenerConfig) -> Self {
        Self::with_clock(store, generator, config, SystemClock)
    }
}

impl<S: MappingStore, G: Generator, C: Clock> ShortenerService<S, G, C> {
    /// Creates a service that stamps mappings with `clock`.
    pub fn with_clock(store: S, generator: G, config: ShortenerConfig, clock: C) -> Self {
        Self {
            store: Arc::new(store),
            generator: Arc::new(generator),
            clock: Arc::new(clock),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ShortenerConfig {
        &self.config
    }

    /// Asks the store to drop expired records.
    pub async fn purge_expired(&self) -> Result<u64> {
        Ok(self.store.purge_expired().await?)
    }

    fn build_mapping(&self, long_url: &LongUrl) -> Result<Mapping> {
        let mapping = Mapping::new(
            self.generator.generate(),
            long_url.clone(),
            self.config.base_url(),
            self.clock.now(),
            self.config.expiry(),
        )?;
        Ok(mapping)
    }
}

#[async_trait]
impl<S: MappingStore, G: Generator, C: Clock> Shortener for ShortenerService<S, G, C> {
    async fn shorten(&self, request: CreateRequest) -> Result<Mapping> {
        let long_url = LongUrl::parse(&request.long_url)?;
        let attempts = self.config.max_attempts();

        for attempt in 1..=attempts {
            let mapping = self.build_mapping(&long_url)?;

            match self.store.put(mapping.clone(), PutMode::IfAbsent).await {
                Ok(()) => {
                    debug!(
                        short_id = %mapping.short_id(),
                        attempt,
                        expires_at = %mapping.expires_at(),
                        "created mapping"
                    );
                    return Ok(mapping);
                }
                Err(StorageError::Conflict(id)) => {
                    warn!(short_id = %id, attempt, attempts, "short id collision, retrying");
                }
                Err(e) => {
                    warn!(short_id = %mapping.short_id(), error = %e, "failed to store mapping");
                    return Err(e.into());
                }
            }
        }

        Err(ShortenerError::CollisionRetriesExhausted { attempts })
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        Ok(self.store.delete(id).await?)
    }
}
