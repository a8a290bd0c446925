//! BitActor Foundation
//!
//! Core foundational utilities for the BitActor causal execution runtime.
//! Provides stable hashing, typed index identifiers, the trinity contract
//! constants, and the cycle-source capability required across crates.
//!
//! # Trinity Contract
//!
//! The runtime is bounded by three constants, fixed at compile time:
//!
//! - **8 cycles** — no hot-path operation may exceed [`TRINITY_MAX_CYCLES`]
//! - **8 hops** — causal chains are bounded by [`TRINITY_MAX_HOPS`]
//! - **8 bits** — the meaning quantum is [`TRINITY_QUANTUM_BITS`] wide
//!
//! Everything else in the system (pool sizes, ring capacities, pattern
//! slots) is derived from the same power-of-two discipline so that masks
//! and offsets stay branch-free in the hot path.

pub mod cycles;
pub mod ids;
pub mod stable_hash;

pub use cycles::{CounterSource, CycleSource};
pub use ids::{ActorRef, ActorSlot, ConnectionId, DomainId, PatternId, TripleSlot};
pub use stable_hash::{fnv1a64, fnv1a64_mix, fnv1a64_str, FNV1A_OFFSET_BASIS_64, FNV1A_PRIME_64};

/// Maximum cycles a single hot-path operation may consume.
pub const TRINITY_MAX_CYCLES: u64 = 8;

/// Maximum hops in any causal chain (cognitive hops, entanglement hops).
pub const TRINITY_MAX_HOPS: u8 = 8;

/// Width of the meaning quantum in bits.
pub const TRINITY_QUANTUM_BITS: u32 = 8;

/// Actor pool size per domain.
pub const MAX_ACTORS_PER_DOMAIN: usize = 256;

/// Width of a domain's active mask: only the first 64 slots of the pool
/// are schedulable per tick.
pub const MAX_ACTIVE_SLOTS: usize = 64;

/// Domains per matrix.
pub const MAX_DOMAINS: usize = 8;

/// Entanglement connections per oracle.
pub const MAX_CONNECTIONS: usize = 64;

/// Capacity of the entanglement signal ring buffer.
pub const SIGNAL_RING_CAPACITY: usize = 256;

/// Maximum remaining hops an entanglement signal may carry.
pub const MAX_SIGNAL_HOPS: u8 = 8;

/// Learning patterns per learning actor.
pub const MAX_PATTERNS_PER_ACTOR: usize = 8;

/// NanoRegex patterns per feed actor.
pub const MAX_FEED_PATTERNS: usize = 8;

/// Bytecode bytes per compiled manifest.
pub const MAX_BYTECODE_SIZE: usize = 256;

/// Inline pattern data slot of a NanoRegex.
pub const MAX_PATTERN_DATA: usize = 64;

/// Registry entries per matrix.
pub const MAX_REGISTRY_ENTRIES: usize = 256;

/// Maximum registry name length in bytes.
pub const MAX_NAME_LEN: usize = 64;

/// Dark triples per dark-triple system.
pub const MAX_DARK_TRIPLES: usize = 64;

/// Compiled logic bytes per learning pattern.
pub const MAX_PATTERN_LOGIC: usize = 32;

/// Default cycle threshold under which an execution counts as sub-100ns
/// (700 cycles at a nominal 7 GHz). Tunable per matrix.
pub const SUB_100NS_CYCLE_THRESHOLD: u64 = 700;
