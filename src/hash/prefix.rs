// 3-byte prefix hash feeding the hash-chain index.
//
// Packs the three bytes big-endian into a u32, multiplies by the 32-bit
// golden-ratio constant and keeps the top HASH_BITS bits.

use super::config::{HASH_BITS, MIN_MATCH};

/// Multiplicative hashing constant (2^32 / phi).
pub const HASH_MULT: u32 = 0x9E37_79B1;

/// Hash the first three bytes of `base` into a bucket index.
///
/// The result is always `< HASH_SIZE`.
#[inline(always)]
pub fn hash3(base: &[u8]) -> usize {
    debug_assert!(base.len() >= MIN_MATCH);
    let packed = (base[0] as u32) << 16 | (base[1] as u32) << 8 | base[2] as u32;
    (packed.wrapping_mul(HASH_MULT) >> (32 - HASH_BITS)) as usize
}
