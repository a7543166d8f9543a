use crate::Generator;
use std::sync::atomic::{AtomicU64, Ordering};
use tinylink_core::ShortId;

/// A deterministic generator producing `<prefix><counter>` ids.
///
/// Codes look like "tl000000", "tl000001", ... which makes it handy for
/// tests and local runs where predictable ids matter more than
/// unguessability. The prefix must itself be a valid id fragment.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortId {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortId::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
