use thiserror::Error;

/// Errors returned when a generator is configured.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("invalid id length {length}; expected 1..={max_length}")]
    InvalidLength { length: usize, max_length: usize },
}
