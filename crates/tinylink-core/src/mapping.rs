use crate::error::CoreError;
use crate::long_url::LongUrl;
use crate::shortcode::ShortId;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Five 365-day years. Leap days are ignored.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 365 * 86_400);

/// How long a mapping stays live after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryPolicy {
    ttl: Duration,
}

impl ExpiryPolicy {
    /// Creates a policy with a fixed TTL.
    ///
    /// Expiry instants are stored in whole seconds, so the TTL must be at
    /// least one second to keep `expires_at` after `created_at`.
    pub fn new(ttl: Duration) -> Result<Self, CoreError> {
        if ttl < Duration::from_secs(1) {
            return Err(CoreError::InvalidTtl(format!(
                "ttl must be at least one second, got {:?}",
                ttl
            )));
        }
        SignedDuration::try_from(ttl)
            .map_err(|e| CoreError::InvalidTtl(format!("ttl {:?} is out of range: {}", ttl, e)))?;
        Ok(Self { ttl })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Computes the expiry instant for a record created at `created_at`,
    /// truncated to whole seconds.
    pub fn expires_at(&self, created_at: Timestamp) -> Result<Timestamp, CoreError> {
        let ttl = SignedDuration::try_from(self.ttl)
            .map_err(|e| CoreError::InvalidTtl(e.to_string()))?;
        let end = created_at
            .checked_add(ttl)
            .map_err(|e| CoreError::InvalidTtl(format!("expiry is out of range: {}", e)))?;
        Timestamp::from_second(end.as_second())
            .map_err(|e| CoreError::InvalidTtl(format!("expiry is out of range: {}", e)))
    }
}

impl Default for ExpiryPolicy {
    fn default() -> Self {
        Self { ttl: DEFAULT_TTL }
    }
}

/// The persisted association between a short id and a long URL.
///
/// `created_at` has millisecond precision and `expires_at` second precision,
/// matching the integer representation used by the stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredMapping", into = "StoredMapping")]
pub struct Mapping {
    short_id: ShortId,
    long_url: String,
    short_url: String,
    created_at: Timestamp,
    expires_at: Timestamp,
}

impl Mapping {
    /// Builds a fresh mapping for `short_id`, deriving `short_url` from
    /// `base_url` and `expires_at` from `policy`.
    pub fn new(
        short_id: ShortId,
        long_url: LongUrl,
        base_url: &str,
        created_at: Timestamp,
        policy: &ExpiryPolicy,
    ) -> Result<Self, CoreError> {
        let created_at = truncate_to_millis(created_at)?;
        let expires_at = policy.expires_at(created_at)?;
        let short_url = short_id.to_url(base_url);

        Self::from_parts(
            short_id,
            long_url.into_string(),
            short_url,
            created_at,
            expires_at,
        )
    }

    /// Reassembles a mapping read back from a store.
    pub fn from_parts(
        short_id: ShortId,
        long_url: String,
        short_url: String,
        created_at: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Self, CoreError> {
        if expires_at <= created_at {
            return Err(CoreError::InvalidTtl(format!(
                "expires_at ({}) must be after created_at ({})",
                expires_at, created_at
            )));
        }

        Ok(Self {
            short_id,
            long_url,
            short_url,
            created_at,
            expires_at,
        })
    }

    pub fn short_id(&self) -> &ShortId {
        &self.short_id
    }

    pub fn long_url(&self) -> &str {
        &self.long_url
    }

    pub fn short_url(&self) -> &str {
        &self.short_url
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn expires_at(&self) -> Timestamp {
        self.expires_at
    }

    /// Epoch milliseconds at creation.
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.as_millisecond()
    }

    /// Epoch seconds after which the record may be purged.
    pub fn expires_at_seconds(&self) -> i64 {
        self.expires_at.as_second()
    }

    /// A mapping is expired from `expires_at` onwards.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

fn truncate_to_millis(ts: Timestamp) -> Result<Timestamp, CoreError> {
    Timestamp::from_millisecond(ts.as_millisecond())
        .map_err(|e| CoreError::InvalidTtl(format!("timestamp is out of range: {}", e)))
}

#[derive(Serialize, Deserialize)]
struct StoredMapping {
    short_id: ShortId,
    long_url: String,
    short_url: String,
    #[serde(with = "jiff::fmt::serde::timestamp::millisecond::required")]
    created_at: Timestamp,
    #[serde(with = "jiff::fmt::serde::timestamp::second::required")]
    expires_at: Timestamp,
}

impl TryFrom<StoredMapping> for Mapping {
    type Error = CoreError;

    fn try_from(value: StoredMapping) -> Result<Self, Self::Error> {
        Mapping::from_parts(
            value.short_id,
            value.long_url,
            value.short_url,
            value.created_at,
            value.expires_at,
        )
    }
}

impl From<Mapping> for StoredMapping {
    fn from(value: Mapping) -> Self {
        Self {
            short_id: value.short_id,
            long_url: value.long_url,
            short_url: value.short_url,
            created_at: value.created_at,
            expires_at: value.expires_at,
        }
    }
}
