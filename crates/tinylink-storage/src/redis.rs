use async_trait::async_trait;
use redis::AsyncCommands;
use tinylink_core::repository::{MappingStore, PutMode, ReadMappingStore, Result};
use tinylink_core::{Mapping, ShortId, StorageError};
use tracing::{debug, trace, warn};

/// Redis implementation of the store contract.
///
/// Each mapping is a JSON string whose key expires at the mapping's
/// `expires_at` (`EXAT`), so Redis reclaims expired records by itself.
/// Conditional writes use `SET ... NX`.
#[derive(Clone)]
pub struct RedisMappingStore {
    conn: redis::aio::MultiplexedConnection,
    key_prefix: String,
}

impl RedisMappingStore {
    /// Creates a store on top of a multiplexed connection.
    pub fn new(conn: redis::aio::MultiplexedConnection) -> Self {
        Self::with_prefix(conn, "tl:map:")
    }

    /// Creates a store with a custom key prefix (e.g., "myapp:map:").
    pub fn with_prefix(
        conn: redis::aio::MultiplexedConnection,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url).map_err(map_redis_error)?;
        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(map_redis_error)?;
        Ok(Self::new(conn))
    }

    fn key(&self, id: &ShortId) -> String {
        format!("{}{}", self.key_prefix, id.as_str())
    }
}

impl std::fmt::Debug for RedisMappingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMappingStore")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(err: redis::RedisError) -> StorageError {
    let message = err.to_string();

    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
        StorageError::Unavailable(message)
    } else {
        StorageError::Query(message)
    }
}

#[async_trait]
impl ReadMappingStore for RedisMappingStore {
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>> {
        let key = self.key(id);
        trace!(short_id = %id, "fetching mapping from redis");

        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(&key).await.map_err(map_redis_error)?;

        let Some(raw) = raw else {
            return Ok(None);
        };

        serde_json::from_str::<Mapping>(&raw).map(Some).map_err(|e| {
            warn!(short_id = %id, error = %e, "failed to deserialize stored mapping");
            StorageError::InvalidData(format!("mapping for '{}' is invalid: {e}", id))
        })
    }
}

#[async_trait]
impl MappingStore for RedisMappingStore {
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()> {
        let id = mapping.short_id().clone();
        let key = self.key(&id);
        let json = serde_json::to_string(&mapping)
            .map_err(|e| StorageError::InvalidData(format!("failed to serialize mapping: {e}")))?;

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(json);
        if mode == PutMode::IfAbsent {
            cmd.arg("NX");
        }
        cmd.arg("EXAT").arg(mapping.expires_at_seconds());

        let mut conn = self.conn.clone();
        let reply: redis::Value = cmd.query_async(&mut conn).await.map_err(map_redis_error)?;

        if matches!(reply, redis::Value::Nil) {
            return Err(StorageError::Conflict(id.to_string()));
        }

        debug!(short_id = %id, "stored mapping in redis");
        Ok(())
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        let mut conn = self.conn.clone();
        let removed: u64 = conn.del(self.key(id)).await.map_err(map_redis_error)?;
        Ok(removed > 0)
    }
}
