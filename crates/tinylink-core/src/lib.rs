//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the value types and store contract shared by the
//! create flow (`tinylink-shortener`) and the resolve flow
//! (`tinylink-redirector`).

pub mod clock;
pub mod error;
pub mod long_url;
pub mod mapping;
pub mod model;
pub mod repository;
pub mod shortcode;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CoreError, StorageError};
pub use long_url::LongUrl;
pub use mapping::{ExpiryPolicy, Mapping, DEFAULT_TTL};
pub use model::{CreateRequest, CreateResponse, ResolveResponse};
pub use repository::{MappingStore, PutMode, ReadMappingStore};
pub use shortcode::ShortId;
