//! Seedable 32-bit FNV-1a hash used to pick palette entries

/// FNV-1a 32-bit offset basis
pub const FNV_OFFSET_BASIS: u32 = 2_166_136_261;
/// FNV-1a 32-bit prime
pub const FNV_PRIME: u32 = 16_777_619;

/// Hash `bytes` with 32-bit FNV-1a, then fold in `seed` by XOR.
///
/// The result depends only on the bytes and the seed, so it is stable across
/// runs and platforms.
#[inline]
pub fn fnv1a(bytes: &[u8], seed: u32) -> u32 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in bytes {
        hash ^= u32::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash ^ seed
}

/// Derive a seed from a user supplied string.
pub fn seed_from_str(text: &str) -> u32 {
    fnv1a(text.as_bytes(), 0)
}
