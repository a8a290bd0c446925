//! Specification → manifest translation.
//!
//! Compilation is a deterministic synthesis: the specification text is
//! canonicalized into a flat opcode stream of at most 256 bytes, the spec
//! hash is taken over that canonical form, and the emitted bytecode is
//! re-hashed and required to equal it. The essential property is
//! reproducibility — the same specification always produces the same
//! manifest, and the manifest's bytecode always hashes back to the
//! specification hash.
//!
//! # Canonical opcode form
//!
//! Every byte of the stream is a valid meaning-transform opcode (an XOR
//! mask consumed by the actor hot path), so canonicalization maps the
//! specification onto the instruction space directly:
//!
//! - Specifications of up to 256 bytes are emitted byte-for-byte.
//! - Longer specifications are block-folded: byte `i` of the text XORs
//!   into stream position `i mod 256`. Folding keeps the stream within the
//!   manifest capacity while remaining sensitive to every input byte.
//! - Every emitted byte is masked with [`OPCODE_MEANING_MASK`]: the
//!   validity and signal-incorporation bits are reserved to the hot path.

use std::sync::Arc;

use bitactor_foundation::{fnv1a64, MAX_BYTECODE_SIZE};
use tracing::debug;

use crate::error::{CompileError, Result};
use crate::manifest::Manifest;
use crate::opcode::OPCODE_MEANING_MASK;

/// Compile a declarative specification into a shared manifest.
///
/// # Errors
///
/// - [`CompileError::EmptySpec`] if `spec_text` is empty.
/// - [`CompileError::InvariantViolation`] if the emitted bytecode does not
///   hash to the specification hash. No manifest is returned.
///
/// # Example
///
/// ```
/// let a = bitactor_aot::compile("trading_actor_v1").unwrap();
/// let b = bitactor_aot::compile("trading_actor_v1").unwrap();
/// assert_eq!(a.spec_hash(), b.spec_hash());
/// assert_eq!(a.bytecode(), b.bytecode());
/// ```
pub fn compile(spec_text: &str) -> Result<Arc<Manifest>> {
    if spec_text.is_empty() {
        return Err(CompileError::EmptySpec);
    }

    let bytecode = canonicalize(spec_text.as_bytes());
    let spec_hash = fnv1a64(&bytecode);

    let manifest = Manifest::from_parts(spec_hash, bytecode)?;
    debug!(
        spec_hash = manifest.spec_hash(),
        size = manifest.size(),
        "specification compiled"
    );
    Ok(Arc::new(manifest))
}

/// Canonicalize specification text into the opcode stream.
///
/// Deterministic and total for non-empty input; output length is
/// `min(len, 256)`.
fn canonicalize(bytes: &[u8]) -> Vec<u8> {
    let mut stream = if bytes.len() <= MAX_BYTECODE_SIZE {
        bytes.to_vec()
    } else {
        let mut folded = vec![0u8; MAX_BYTECODE_SIZE];
        for (i, byte) in bytes.iter().enumerate() {
            folded[i % MAX_BYTECODE_SIZE] ^= byte;
        }
        folded
    };
    for byte in &mut stream {
        *byte &= OPCODE_MEANING_MASK;
    }
    stream
}
