use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tinylink_core::repository::{MappingStore, PutMode, ReadMappingStore, Result};
use tinylink_core::{Clock, Mapping, ShortId, StorageError, SystemClock};

/// In-memory implementation of the store contract using DashMap.
///
/// Conditional writes go through DashMap's entry API, which holds the shard
/// lock for the whole check-and-insert. Expired entries behave as absent and
/// are dropped lazily on access or by [`MappingStore::purge_expired`].
#[derive(Debug)]
pub struct InMemoryMappingStore<C = SystemClock> {
    storage: DashMap<ShortId, Mapping>,
    clock: C,
}

impl InMemoryMappingStore<SystemClock> {
    /// Creates a new in-memory store on the wall clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
            clock: SystemClock,
        }
    }
}

impl<C: Clock> InMemoryMappingStore<C> {
    /// Creates a store that judges expiry by `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            storage: DashMap::new(),
            clock,
        }
    }

    /// Number of stored records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

impl Default for InMemoryMappingStore<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<C: Clock> ReadMappingStore for InMemoryMappingStore<C> {
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>> {
        let now = self.clock.now();

        if self
            .storage
            .remove_if(id, |_, mapping| mapping.is_expired_at(now))
            .is_some()
        {
            return Ok(None);
        }

        Ok(self.storage.get(id).map(|entry| entry.value().clone()))
    }
}

#[async_trait]
impl<C: Clock> MappingStore for InMemoryMappingStore<C> {
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()> {
        let now = self.clock.now();

        match self.storage.entry(mapping.short_id().clone()) {
            Entry::Occupied(mut occupied) => {
                if mode == PutMode::IfAbsent && !occupied.get().is_expired_at(now) {
                    return Err(StorageError::Conflict(mapping.short_id().to_string()));
                }
                occupied.insert(mapping);
            }
            Entry::Vacant(vacant) => {
                vacant.insert(mapping);
            }
        }

        Ok(())
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        let now = self.clock.now();
        Ok(self
            .storage
            .remove(id)
            .is_some_and(|(_, mapping)| !mapping.is_expired_at(now)))
    }

    async fn purge_expired(&self) -> Result<u64> {
        let now = self.clock.now();
        let mut removed = 0;

        self.storage.retain(|_, mapping| {
            let keep = !mapping.is_expired_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}
