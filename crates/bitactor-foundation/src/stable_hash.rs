//! Stable hashing for deterministic identities.
//!
//! BitActor requires that every derived identifier — specification hashes,
//! pattern hashes, signal match words — be a deterministic consequence of
//! explicit inputs. These helpers provide a stable FNV-1a 64-bit
//! implementation shared across crates. The hash=execution law is stated
//! over this function: a manifest's bytecode must hash to its spec hash.
//!
//! NOTE: FNV-1a is **not** cryptographically secure. It is used strictly
//! for stable identities and deterministic derivations.

/// 64-bit FNV-1a offset basis.
pub const FNV1A_OFFSET_BASIS_64: u64 = 0xcbf29ce484222325;
/// 64-bit FNV-1a prime.
pub const FNV1A_PRIME_64: u64 = 0x0000_0100_0000_01B3;

/// Mix bytes into an existing FNV-1a 64-bit hash state.
///
/// Implements the core FNV-1a update step: for each byte, XOR it into the
/// hash and multiply by the FNV prime.
///
/// # Parameters
/// - `hash`: Current hash state (use [`FNV1A_OFFSET_BASIS_64`] for a fresh hash)
/// - `bytes`: Byte slice to mix into the hash
///
/// # Example
/// ```
/// use bitactor_foundation::stable_hash::{fnv1a64_mix, FNV1A_OFFSET_BASIS_64};
///
/// let hash = FNV1A_OFFSET_BASIS_64;
/// let hash = fnv1a64_mix(hash, b"spec");
/// let hash = fnv1a64_mix(hash, b"text");
/// ```
#[inline]
pub const fn fnv1a64_mix(mut hash: u64, bytes: &[u8]) -> u64 {
    let mut i = 0usize;
    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV1A_PRIME_64);
        i += 1;
    }
    hash
}

/// Hash an arbitrary byte slice with FNV-1a 64-bit.
#[inline]
pub const fn fnv1a64(bytes: &[u8]) -> u64 {
    fnv1a64_mix(FNV1A_OFFSET_BASIS_64, bytes)
}

/// Hash a UTF-8 string with FNV-1a 64-bit.
#[inline]
pub const fn fnv1a64_str(s: &str) -> u64 {
    fnv1a64(s.as_bytes())
}
