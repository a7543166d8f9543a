pub mod error;
pub mod random;
pub mod seq;

pub use error::GeneratorError;
pub use random::RandomGenerator;
pub use seq::SeqGenerator;

use tinylink_core::ShortId;

/// Trait for generating short ids.
///
/// Implementations are pure generators that don't interact with storage,
/// so they make no uniqueness promise. Collisions are caught by the store's
/// conditional write.
pub trait Generator: Send + Sync + 'static {
    /// Produces the next candidate id. Never blocks and never fails.
    fn generate(&self) -> ShortId;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    fn generate(&self) -> ShortId {
        (**self).generate()
    }
}
