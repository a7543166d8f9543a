use crate::error::Result;
use async_trait::async_trait;
use tinylink_core::{CreateRequest, Mapping, ShortId};

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens the requested URL and returns the stored mapping.
    async fn shorten(&self, request: CreateRequest) -> Result<Mapping>;

    /// Deletes a mapping by its short id.
    /// Returns `true` if a live record existed and was removed.
    async fn delete(&self, id: &ShortId) -> Result<bool>;
}
