//! Resolve flow for tinylink.
//!
//! [`RedirectorService`] looks a short id up in a read-only store and hands
//! back the live mapping, or `None` when the id is unknown or expired.
//!
//! # Example
//!
//! ```rust
//! use tinylink_redirector::RedirectorService;
//! use tinylink_storage::InMemoryMappingStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = RedirectorService::new(InMemoryMappingStore::new());
//!
//! match service.resolve_str("abc123").await? {
//!     Some(mapping) => println!("Redirect to: {}", mapping.long_url()),
//!     None => println!("Not found"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod redirector;
pub mod service;

pub use error::RedirectorError;
pub use redirector::Redirector;
pub use service::RedirectorService;

pub type Result<T> = std::result::Result<T, RedirectorError>;
