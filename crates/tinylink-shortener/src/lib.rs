//! URL shortener service implementation.
//!
//! This crate provides the create flow: it validates the destination,
//! draws ids from a [`tinylink_generator::Generator`] and writes them with
//! an atomic conditional put, retrying a bounded number of times on
//! collision. Core types are re-exported from `tinylink_core`.

pub mod config;
pub mod error;
pub mod service;
pub mod shortener;

pub use config::{ShortenerConfig, DEFAULT_MAX_ATTEMPTS};
pub use error::{Result, ShortenerError};
pub use service::ShortenerService;
pub use shortener::Shortener;
pub use tinylink_core::{CreateRequest, CreateResponse, Mapping, ResolveResponse, ShortId};
