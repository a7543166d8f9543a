use async_trait::async_trait;
use jiff::Timestamp;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tinylink_core::repository::{MappingStore, PutMode, ReadMappingStore, Result};
use tinylink_core::{Mapping, ShortId, StorageError};
use tracing::{debug, trace};

/// MySQL implementation of the store contract.
///
/// MySQL has no native TTL, so reads filter on `expires_at` and
/// [`MappingStore::purge_expired`] does the reclamation. The primary key on
/// `short_id` is what makes conditional writes atomic.
#[derive(Debug, Clone)]
pub struct MySqlMappingStore {
    pool: MySqlPool,
}

impl MySqlMappingStore {
    /// Creates a store from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a store by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(include_str!("../ddl/mysql/mappings.sql"))
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn now_unix_seconds() -> i64 {
    Timestamp::now().as_second()
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn row_to_mapping(row: MySqlRow) -> Result<Mapping> {
    let short_id: String = row.try_get("short_id").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    let short_url: String = row.try_get("short_url").map_err(map_sqlx_error)?;
    let created_at_raw: i64 = row.try_get("created_at").map_err(map_sqlx_error)?;
    let expires_at_raw: i64 = row.try_get("expires_at").map_err(map_sqlx_error)?;

    let invalid = |e: &dyn std::fmt::Display| {
        StorageError::InvalidData(format!("row for '{}' is invalid: {e}", short_id))
    };

    let created_at = Timestamp::from_millisecond(created_at_raw).map_err(|e| invalid(&e))?;
    let expires_at = Timestamp::from_second(expires_at_raw).map_err(|e| invalid(&e))?;
    let id = ShortId::new(short_id.as_str()).map_err(|e| invalid(&e))?;

    Mapping::from_parts(id, long_url, short_url, created_at, expires_at).map_err(|e| invalid(&e))
}

#[async_trait]
impl ReadMappingStore for MySqlMappingStore {
    async fn get(&self, id: &ShortId) -> Result<Option<Mapping>> {
        trace!(short_id = %id, "fetching mapping from mysql");

        let row = sqlx::query(
            r#"
            SELECT short_id, long_url, short_url, created_at, expires_at
            FROM mappings
            WHERE short_id = ?
              AND expires_at > ?
            LIMIT 1
            "#,
        )
        .bind(id.as_str())
        .bind(now_unix_seconds())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }
}

#[async_trait]
impl MappingStore for MySqlMappingStore {
    async fn put(&self, mapping: Mapping, mode: PutMode) -> Result<()> {
        let id = mapping.short_id().clone();

        let result = match mode {
            PutMode::IfAbsent => {
                // An expired row behaves as absent; clear it so the insert
                // below only trips on live records.
                sqlx::query(
                    r#"
                    DELETE FROM mappings
                    WHERE short_id = ?
                      AND expires_at <= ?
                    "#,
                )
                .bind(id.as_str())
                .bind(now_unix_seconds())
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

                sqlx::query(
                    r#"
                    INSERT INTO mappings (short_id, long_url, short_url, created_at, expires_at)
                    VALUES (?, ?, ?, ?, ?)
                    "#,
                )
                .bind(id.as_str())
                .bind(mapping.long_url())
                .bind(mapping.short_url())
                .bind(mapping.created_at_millis())
                .bind(mapping.expires_at_seconds())
                .execute(&self.pool)
                .await
            }
            PutMode::Overwrite => {
                sqlx::query(
                    r#"
                    INSERT INTO mappings (short_id, long_url, short_url, created_at, expires_at)
                    VALUES (?, ?, ?, ?, ?) AS incoming
                    ON DUPLICATE KEY UPDATE
                        long_url = incoming.long_url,
                        short_url = incoming.short_url,
                        created_at = incoming.created_at,
                        expires_at = incoming.expires_at
                    "#,
                )
                .bind(id.as_str())
                .bind(mapping.long_url())
                .bind(mapping.short_url())
                .bind(mapping.created_at_millis())
                .bind(mapping.expires_at_seconds())
                .execute(&self.pool)
                .await
            }
        };

        match result {
            Ok(_) => {
                debug!(short_id = %id, "stored mapping in mysql");
                Ok(())
            }
            Err(err) if is_unique_violation(&err) => Err(StorageError::Conflict(id.to_string())),
            Err(err) => Err(map_sqlx_error(err)),
        }
    }

    async fn delete(&self, id: &ShortId) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM mappings
            WHERE short_id = ?
              AND expires_at > ?
            "#,
        )
        .bind(id.as_str())
        .bind(now_unix_seconds())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn purge_expired(&self) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM mappings
            WHERE expires_at <= ?
            "#,
        )
        .bind(now_unix_seconds())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        debug!(removed = result.rows_affected(), "purged expired mappings");
        Ok(result.rows_affected())
    }
}
