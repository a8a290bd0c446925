//! Runtime errors for causal execution.
//!
//! # Error Handling Policy
//!
//! Hard failures — capacity limits, name collisions, bad addresses — are
//! surfaced to the caller immediately as structured results. Soft failures
//! never abort a tick: bounded rejections and budget violations are counted
//! in metrics and, where applicable, reported through the telemetry sink.
//! Nothing in this crate panics on simulation state.

use thiserror::Error;

use bitactor_foundation::{ActorRef, DomainId, PatternId};

/// Runtime result type alias.
pub type Result<T> = std::result::Result<T, RuntimeError>;

/// Errors that can occur while assembling or addressing the runtime.
///
/// These are setup-path errors. The hot path has no error channel at all:
/// its failure modes (budget breach, dropped signals) are observability
/// concerns, not control flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// An add operation would exceed a fixed pool bound.
    ///
    /// All pools in the runtime are fixed-capacity by contract: actors per
    /// domain, domains per matrix, connections per oracle, patterns per
    /// actor, registry entries. The caller decides how to proceed.
    #[error("{what} capacity exceeded (capacity {capacity})")]
    CapacityExceeded {
        /// The pool that is full.
        what: &'static str,
        /// The fixed capacity of that pool.
        capacity: usize,
    },

    /// A registry name is already taken.
    #[error("duplicate registry name: {0:?}")]
    DuplicateName(String),

    /// A registry name exceeds the fixed name slot.
    #[error("registry name is {len} bytes, limit is {max}")]
    NameTooLong {
        /// Offending name length in bytes.
        len: usize,
        /// Fixed name capacity.
        max: usize,
    },

    /// A domain id does not address a created domain.
    #[error("no such domain: {0}")]
    NoSuchDomain(DomainId),

    /// An actor reference does not address a created actor.
    #[error("no such actor: {0}")]
    NoSuchActor(ActorRef),

    /// A pattern id does not address an installed pattern on an actor.
    #[error("no such pattern {pattern} on actor {actor}")]
    NoSuchPattern {
        /// The actor whose pattern store was addressed.
        actor: ActorRef,
        /// The missing pattern id.
        pattern: PatternId,
    },
}
