//! Ping reply hash
//!
//! A Knuth-style multiplicative mix. It only proves the device saw the
//! request; it is not suitable for anything security related.

/// Value XORed into the input before mixing
pub const HASH_SEED: u32 = 0x00AB_CDEF;

/// Knuth's multiplicative hashing constant (2^32 / golden ratio)
pub const HASH_MULTIPLIER: u32 = 2_654_435_761;

/// Hash a ping value
///
/// ```text
/// h = ((x ^ 0x00ABCDEF) * 2654435761) mod 2^32
/// h = (h >> 16) ^ h
/// ```
pub const fn ping_hash(x: u32) -> u32 {
    let h = (x ^ HASH_SEED).wrapping_mul(HASH_MULTIPLIER);
    (h >> 16) ^ h
}

/// Hash a ping value and encode it for the wire (little-endian)
pub const fn ping_hash_bytes(x: u32) -> [u8; 4] {
    ping_hash(x).to_le_bytes()
}
