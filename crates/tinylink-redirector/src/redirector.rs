use crate::Result;
use async_trait::async_trait;
use tinylink_core::{Mapping, ShortId};

#[async_trait]
pub trait Redirector: Send + Sync + 'static {
    /// Resolves a short id to its live mapping.
    /// Returns `None` if the id does not exist or has expired.
    async fn resolve(&self, id: &ShortId) -> Result<Option<Mapping>>;
}
