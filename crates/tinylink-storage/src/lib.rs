//! Store backends for tinylink mappings.
//!
//! Every backend implements [`MappingStore`]; pick one at startup and inject
//! it into the services. [`TimeoutStore`] wraps any of them with a deadline.

pub mod memory;
pub mod mysql;
pub mod redis;
pub mod timeout;

pub use self::memory::InMemoryMappingStore;
pub use self::mysql::MySqlMappingStore;
pub use self::redis::RedisMappingStore;
pub use self::timeout::TimeoutStore;
pub use tinylink_core::repository::{MappingStore, PutMode, ReadMappingStore, Result};
pub use tinylink_core::StorageError;
