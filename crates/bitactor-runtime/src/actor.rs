//! The BitActor execution unit and its hot path.
//!
//! A BitActor holds an 8-bit meaning quantum, a causal vector, and a copy
//! of its manifest's bytecode in a cache-aligned buffer. The hot path is
//! the tightest contract in the system: a straight-line sequence of reads
//! and writes with no branches on actor-private data beyond bounds checks,
//! bounded at eight cycles.
//!
//! # Meaning bits
//!
//! - bit 1 — validity, set on every execution
//! - bit 5 — pending-signal incorporation
//! - bits 0-3 — the constraint nibble checked by the SHACL hop
//! - bit 7 — dark-activation marker
//! - bit 6 — cascade marker set by dark-triple activation

use std::sync::Arc;

use tracing::warn;

use bitactor_aot::Manifest;
use bitactor_foundation::{ActorRef, CycleSource, MAX_BYTECODE_SIZE, TRINITY_MAX_CYCLES};

use crate::telemetry::TelemetrySink;

/// A single causal execution unit.
///
/// Hot fields live together in one cache-aligned record; the bytecode is
/// copied out of the shared manifest at creation so the hot path never
/// chases the `Arc`. Mutated only by the owning matrix's tick (and, for
/// learning actors, by the learning layer's setup operations).
#[derive(Debug, Clone)]
#[repr(C, align(64))]
pub struct BitActor {
    meaning: u8,
    signal_pending: u8,
    bytecode_offset: u16,
    tick_count: u32,
    causal_vector: u64,
    execution_cycles: u64,
    trinity_compliant: bool,
    last_hop_mask: u8,
    bytecode_size: u16,
    bytecode: [u8; MAX_BYTECODE_SIZE],
    manifest: Arc<Manifest>,
}

impl BitActor {
    /// Instantiate an actor from a compiled manifest.
    ///
    /// The manifest's bytecode is copied into the actor's aligned buffer;
    /// the back-reference keeps the manifest alive for diagnostics.
    pub fn new(meaning: u8, manifest: Arc<Manifest>) -> Self {
        let mut bytecode = [0u8; MAX_BYTECODE_SIZE];
        let size = manifest.size();
        bytecode[..size].copy_from_slice(manifest.bytecode());

        Self {
            meaning,
            signal_pending: 0,
            bytecode_offset: 0,
            tick_count: 0,
            causal_vector: 0,
            execution_cycles: 0,
            trinity_compliant: true,
            last_hop_mask: 0,
            bytecode_size: size as u16,
            bytecode,
            manifest,
        }
    }

    /// Execute one hot-path step.
    ///
    /// Consumes the pending-signal flag (idempotent: after return the flag
    /// is always clear), advances the bytecode cursor, and measures its
    /// own cycle cost. A budget breach marks the actor non-compliant and
    /// emits a telemetry event; execution continues.
    ///
    /// Returns the measured cycle delta.
    pub fn execute_hot_path(
        &mut self,
        actor: ActorRef,
        tick: u64,
        cycles: &dyn CycleSource,
        sink: &mut dyn TelemetrySink,
    ) -> u64 {
        sink.on_tick_start(actor, tick);
        let start = cycles.now();

        debug_assert!(self.bytecode_size > 0);
        let opcode = self.bytecode[self.bytecode_offset as usize];
        self.meaning ^= opcode;
        self.bytecode_offset = (self.bytecode_offset + 1) % self.bytecode_size;
        self.meaning |= (self.signal_pending << 5) | 0x02;
        self.causal_vector += 1;
        self.tick_count += 1;
        self.signal_pending = 0;

        let elapsed = cycles.now().saturating_sub(start);
        self.execution_cycles = elapsed;
        self.trinity_compliant = elapsed <= TRINITY_MAX_CYCLES;

        sink.on_opcode_span(actor, opcode, tick, tick);
        if !self.trinity_compliant {
            warn!(%actor, elapsed, budget = TRINITY_MAX_CYCLES, "hot path exceeded cycle budget");
            sink.on_budget_violation(actor, elapsed, TRINITY_MAX_CYCLES);
        }
        sink.on_tick_end(actor, tick, elapsed);
        elapsed
    }

    /// Fold the high nibble into the low nibble and return the collapsed
    /// meaning (the Collapse Compute hop).
    pub(crate) fn collapse(&mut self) -> u8 {
        self.meaning ^= self.meaning >> 4;
        self.meaning
    }

    /// Current meaning quantum.
    pub fn meaning(&self) -> u8 {
        self.meaning
    }

    /// OR a payload into the meaning (entanglement application, dark
    /// activation).
    pub fn or_meaning(&mut self, payload: u8) {
        self.meaning |= payload;
    }

    /// XOR a mask into the meaning (learning adaptation step).
    pub fn xor_meaning(&mut self, mask: u8) {
        self.meaning ^= mask;
    }

    /// Whether a signal is pending for the next hot-path step.
    pub fn signal_pending(&self) -> bool {
        self.signal_pending != 0
    }

    /// Flag a pending signal for the next hot-path step.
    pub fn set_signal_pending(&mut self) {
        self.signal_pending = 1;
    }

    /// Current bytecode cursor.
    pub fn bytecode_offset(&self) -> u16 {
        self.bytecode_offset
    }

    /// Executions since creation.
    pub fn tick_count(&self) -> u32 {
        self.tick_count
    }

    /// Monotonic causal vector.
    pub fn causal_vector(&self) -> u64 {
        self.causal_vector
    }

    /// OR bits into the causal vector (dark-triple activation marker).
    pub fn or_causal_vector(&mut self, bits: u64) {
        self.causal_vector |= bits;
    }

    /// Cycle cost of the last hot-path step.
    pub fn execution_cycles(&self) -> u64 {
        self.execution_cycles
    }

    /// Whether the last hot-path step stayed within the trinity budget.
    pub fn trinity_compliant(&self) -> bool {
        self.trinity_compliant
    }

    /// Hop result bits of the last cognitive cycle.
    pub fn hop_mask(&self) -> u8 {
        self.last_hop_mask
    }

    pub(crate) fn set_hop_mask(&mut self, mask: u8) {
        self.last_hop_mask = mask;
    }

    /// Bytecode length copied from the manifest.
    pub fn bytecode_size(&self) -> u16 {
        self.bytecode_size
    }

    /// The shared manifest this actor was instantiated from.
    pub fn manifest(&self) -> &Arc<Manifest> {
        &self.manifest
    }
}
