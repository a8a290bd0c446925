//! The immutable compiled-specification bundle.

use bitactor_foundation::{fnv1a64, MAX_BYTECODE_SIZE};
use serde::{Deserialize, Serialize};

use crate::error::{CompileError, Result};

/// Immutable bundle of `{spec_hash, bytecode}` produced by the AOT compiler.
///
/// Many actors may share one manifest: actors hold an `Arc<Manifest>` and
/// copy the bytecode into their own cache-aligned execution buffer at
/// creation. The manifest itself is never mutated after construction and is
/// safe to share across threads.
///
/// # Invariant
///
/// `fnv1a64(bytecode) == spec_hash` — the hash=execution law. The
/// constructor enforces it; [`Manifest::verify`] re-checks it on demand,
/// which is what makes post-compilation tampering detectable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    spec_hash: u64,
    bytecode: Vec<u8>,
}

impl Manifest {
    /// Assemble a manifest from a spec hash and emitted bytecode.
    ///
    /// # Errors
    ///
    /// - [`CompileError::BytecodeTooLarge`] if the bytecode exceeds the
    ///   fixed 256-byte capacity.
    /// - [`CompileError::InvariantViolation`] if the bytecode does not hash
    ///   to `spec_hash`.
    pub fn from_parts(spec_hash: u64, bytecode: Vec<u8>) -> Result<Self> {
        if bytecode.len() > MAX_BYTECODE_SIZE {
            return Err(CompileError::BytecodeTooLarge {
                len: bytecode.len(),
                max: MAX_BYTECODE_SIZE,
            });
        }
        let actual = fnv1a64(&bytecode);
        if actual != spec_hash {
            return Err(CompileError::InvariantViolation {
                expected: spec_hash,
                actual,
            });
        }
        Ok(Self {
            spec_hash,
            bytecode,
        })
    }

    /// The specification hash this manifest was compiled from.
    pub fn spec_hash(&self) -> u64 {
        self.spec_hash
    }

    /// The compiled bytecode.
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Bytecode length in bytes (`1..=256`).
    pub fn size(&self) -> usize {
        self.bytecode.len()
    }

    /// Re-check the hash=execution law.
    ///
    /// Returns `false` iff the bytecode no longer hashes to the spec hash,
    /// i.e. the manifest was tampered with after compilation.
    pub fn verify(&self) -> bool {
        fnv1a64(&self.bytecode) == self.spec_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_enforces_hash_law() {
        let bytecode = vec![0x01, 0x02, 0x03];
        let ok = Manifest::from_parts(fnv1a64(&bytecode), bytecode.clone());
        assert!(ok.is_ok());

        let err = Manifest::from_parts(0xdead_beef, bytecode);
        assert!(matches!(err, Err(CompileError::InvariantViolation { .. })));
    }

    #[test]
    fn test_from_parts_rejects_oversized() {
        let bytecode = vec![0u8; MAX_BYTECODE_SIZE + 1];
        let err = Manifest::from_parts(fnv1a64(&bytecode), bytecode);
        assert!(matches!(err, Err(CompileError::BytecodeTooLarge { .. })));
    }

    #[test]
    fn test_verify_detects_tampering() {
        let bytecode = vec![0x10, 0x20, 0x30, 0x40];
        let manifest = Manifest::from_parts(fnv1a64(&bytecode), bytecode).unwrap();
        assert!(manifest.verify());

        let mut tampered = manifest.clone();
        tampered.bytecode[1] ^= 0xFF;
        assert!(!tampered.verify());
    }

    #[test]
    fn test_serde_roundtrip() {
        let bytecode = vec![0xAA, 0xBB];
        let manifest = Manifest::from_parts(fnv1a64(&bytecode), bytecode).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(manifest, back);
        assert!(back.verify());
    }
}
