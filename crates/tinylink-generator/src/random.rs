use crate::error::GeneratorError;
use crate::Generator;
use rand::RngCore;
use tinylink_core::shortcode::MAX_LENGTH;
use tinylink_core::ShortId;

/// The URL-safe alphabet. Its size is exactly 64 so a random byte masked to
/// six bits picks every symbol with equal probability.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const SYMBOL_MASK: u8 = 0b0011_1111;

/// Generates random ids from the URL-safe alphabet `[A-Za-z0-9_-]`.
///
/// Randomness comes from the thread-local generator, which is seeded from
/// the operating system and periodically reseeded.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing ids of exactly `length` characters.
    pub fn new(length: usize) -> Result<Self, GeneratorError> {
        if length == 0 || length > MAX_LENGTH {
            return Err(GeneratorError::InvalidLength {
                length,
                max_length: MAX_LENGTH,
            });
        }
        Ok(Self { length })
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortId {
        let mut bytes = [0u8; MAX_LENGTH];
        let bytes = &mut bytes[..self.length];
        rand::rng().fill_bytes(bytes);

        let id: String = bytes
            .iter()
            .map(|b| ALPHABET[(b & SYMBOL_MASK) as usize] as char)
            .collect();
        ShortId::new_unchecked(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rejects_zero_length() {
        assert_eq!(
            RandomGenerator::new(0).unwrap_err(),
            GeneratorError::InvalidLength {
                length: 0,
                max_length: MAX_LENGTH
            }
        );
    }

    #[test]
    fn rejects_oversized_length() {
        assert!(RandomGenerator::new(MAX_LENGTH).is_ok());
        assert!(RandomGenerator::new(MAX_LENGTH + 1).is_err());
        assert!(RandomGenerator::new(usize::MAX).is_err());
    }

    #[test]
    fn produces_requested_length_from_alphabet() {
        for length in [1, 8, 12, 64] {
            let generator = RandomGenerator::new(length).unwrap();
            let id = generator.generate();
            assert_eq!(id.as_str().len(), length);
            assert!(id
                .as_str()
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
            // generated ids always pass validation
            assert!(ShortId::new(id.as_str()).is_ok());
        }
    }

    #[test]
    fn no_collision_in_ten_thousand_draws() {
        let generator = RandomGenerator::new(8).unwrap();
        let ids: HashSet<ShortId> = (0..10_000).map(|_| generator.generate()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn covers_the_whole_alphabet() {
        let generator = RandomGenerator::new(64).unwrap();
        let seen: HashSet<u8> = (0..200)
            .flat_map(|_| generator.generate().as_str().as_bytes().to_vec())
            .collect();
        assert_eq!(seen.len(), ALPHABET.len());
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
