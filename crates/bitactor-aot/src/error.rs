//! Compile-time errors.
//!
//! All compiler failures are hard: no manifest or matcher is returned on
//! any error path. Runtime soft failures (bounded rejections, budget
//! violations) live with the runtime crate's metrics, not here.

use thiserror::Error;

/// Compiler result type alias.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Errors produced while compiling specifications and patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// The specification text was empty.
    ///
    /// An empty specification has no canonical opcode form and therefore
    /// no spec hash; nothing can be compiled from it.
    #[error("empty specification")]
    EmptySpec,

    /// The emitted bytecode does not hash to the specification hash.
    ///
    /// This is the hash=execution law failing at the only point it can be
    /// established. The compilation is rejected and no manifest exists.
    #[error("bytecode hash {actual:#018x} does not equal spec hash {expected:#018x}")]
    InvariantViolation {
        /// Hash of the specification's canonical opcode form.
        expected: u64,
        /// Hash of the bytecode actually emitted.
        actual: u64,
    },

    /// Emitted bytecode exceeded the fixed manifest capacity.
    #[error("bytecode length {len} exceeds manifest capacity {max}")]
    BytecodeTooLarge {
        /// Emitted length in bytes.
        len: usize,
        /// Fixed capacity.
        max: usize,
    },

    /// A NanoRegex pattern exceeded its inline data slot.
    #[error("pattern length {len} exceeds inline capacity {max}")]
    PatternTooLong {
        /// Pattern length in bytes.
        len: usize,
        /// Inline slot capacity.
        max: usize,
    },
}
