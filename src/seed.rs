//! Seed strings, the reproducible string hash, and the map PRNG.
//!
//! The hash is deliberately weak; what matters is that every port computes
//! it bit-identically so equal seeds give equal maps.

use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Length of a generated seed string.
pub const SEED_LENGTH: usize = 20;

/// Random seed string over `[0-9A-Za-z]`, seeded from the wall clock.
pub fn random_seed_string() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SEED_LENGTH)
        .map(char::from)
        .collect()
}

/// `(Σ s[i] · 2^i) mod 2^32`.
///
/// Bytes past index 31 multiply a power of two that is 0 mod 2^32, so they
/// cannot contribute.
pub fn hash_seed(seed: &str) -> u32 {
    seed.bytes().enumerate().fold(0u32, |hash, (i, byte)| {
        let weight = 1u32.checked_shl(i as u32).unwrap_or(0);
        hash.wrapping_add((byte as u32).wrapping_mul(weight))
    })
}

/// The deterministic PRNG stream backing a map's generation.
pub fn rng_for_seed(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(hash_seed(seed) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_values_are_pinned() {
        // These exact values are part of the cross-port contract.
        assert_eq!(hash_seed(""), 0);
        assert_eq!(hash_seed("X"), 88);
        assert_eq!(hash_seed("test"), 1706);
        assert_eq!(hash_seed("ab"), 97 + 98 * 2);
    }

    #[test]
    fn test_hash_is_position_sensitive() {
        assert_ne!(hash_seed("ab"), hash_seed("ba"));
    }

    #[test]
    fn test_long_seeds_wrap() {
        // 40 bytes: indices >= 32 contribute nothing.
        let long: String = std::iter::repeat('z').take(40).collect();
        let head: String = std::iter::repeat('z').take(32).collect();
        assert_eq!(hash_seed(&long), hash_seed(&head));
    }

    #[test]
    fn test_seed_string_shape() {
        let s = random_seed_string();
        assert_eq!(s.len(), SEED_LENGTH);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_rng_stream_is_reproducible() {
        let mut a = rng_for_seed("island");
        let mut b = rng_for_seed("island");
        for _ in 0..10 {
            assert_eq!(a.gen::<u64>(), b.gen::<u64>());
        }
    }
}
