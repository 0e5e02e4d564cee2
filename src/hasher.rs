//! Bucket index functions.
//!
//! Words reaching the table are already lowercase ASCII, so both hashers work
//! on raw bytes and reduce to `[0, modulus)` at the end.

use fxhash::hash32 as fxhash32;

/// Maps a word to a bucket of a table with `modulus` buckets
pub trait BucketHasher: Send + Sync {
    /// Returns an index in `[0, modulus)`. `modulus` is never zero.
    fn bucket(&self, word: &str, modulus: u32) -> u32;
}

/// Cheap position-dependent mixing of neighbouring characters.
///
/// Each byte is folded in together with its predecessor, shifted by the
/// position modulo 3, so transposed letters land in different buckets more
/// often than with a plain additive hash. Not meant to resist adversarial
/// input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MixHasher;

impl BucketHasher for MixHasher {
    fn bucket(&self, word: &str, modulus: u32) -> u32 {
        mix_hash(word.as_bytes(), modulus)
    }
}

/// `fxhash` reduced to the table size
#[derive(Debug, Clone, Copy, Default)]
pub struct FxBucketHasher;

impl BucketHasher for FxBucketHasher {
    fn bucket(&self, word: &str, modulus: u32) -> u32 {
        fxhash32(word.as_bytes()) % modulus
    }
}

/// Position-mixing hash of `word` reduced to `[0, modulus)`; the empty word maps to 0
pub fn mix_hash(word: &[u8], modulus: u32) -> u32 {
    let Some((&first, rest)) = word.split_first() else {
        return 0;
    };

    let mut h = modulus ^ (u32::from(first) << 2);
    let mut prev = first;
    let mut len: u32 = 0;
    for &c in rest {
        len = len.wrapping_add(1);
        let shift = len % 3;
        h ^= (u32::from(c) << shift).wrapping_add(u32::from(prev) << (shift + 7));
        prev = c;
    }
    h ^= len;

    h % modulus
}
