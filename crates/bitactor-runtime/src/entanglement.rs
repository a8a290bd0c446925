//! Entanglement Oracle - bounded causal signal propagation.
//!
//! The oracle is a domain's causal fabric: directed connections between
//! actor slots carry 8-bit payloads through a fixed ring buffer, with
//! every path bounded by the trinity hop limit. Propagation scans at most
//! eight connections per call and processing drains at most eight signals
//! per call, so the per-tick cost is bounded regardless of load.
//!
//! # Single writer
//!
//! An oracle is owned by exactly one domain and mutated only during that
//! domain's tick. Signals never cross domains.
//!
//! # Soft failure
//!
//! A full ring or an out-of-bounds hop count never aborts the tick: the
//! signal is dropped and `bounded_rejections` counts it.

use tracing::trace;

use bitactor_foundation::{ActorSlot, MAX_CONNECTIONS, MAX_SIGNAL_HOPS, SIGNAL_RING_CAPACITY};

use crate::actor::BitActor;
use crate::error::{Result, RuntimeError};
use crate::metrics::OracleMetrics;

/// Connections examined per propagation call.
const PROPAGATE_SCAN: usize = 8;

/// Signals drained per processing call.
const PROCESS_DRAIN: usize = 8;

/// Dormant slots examined per dark-activation call.
const DARK_SCAN: usize = 4;

/// Signal flag: the signal is live in the ring.
const FLAG_ACTIVE: u8 = 0x01;

/// Mutable access to the base actors behind a pool.
///
/// The oracle applies signals to [`BitActor`] state regardless of how the
/// pool wraps its actors; extension layers (learning) implement this for
/// their own pool types.
pub trait ActorPool {
    /// Number of actors in the pool.
    fn actor_count(&self) -> usize;

    /// The base actor at `index`, if the slot exists.
    fn base_actor_mut(&mut self, index: usize) -> Option<&mut BitActor>;
}

impl ActorPool for [BitActor] {
    fn actor_count(&self) -> usize {
        self.len()
    }

    fn base_actor_mut(&mut self, index: usize) -> Option<&mut BitActor> {
        self.get_mut(index)
    }
}

/// A directed causal connection between two actor slots.
#[derive(Debug, Clone, Copy)]
pub struct EntanglementConnection {
    /// Originating actor slot.
    pub source: ActorSlot,
    /// Destination actor slot.
    pub target: ActorSlot,
    /// Hop budget of the most recent propagation over this connection.
    pub hop_count: u8,
    /// Connection weight (reserved for adaptive propagation).
    pub signal_strength: u8,
    /// Connection state flags.
    pub flags: u8,
    /// Tick of the most recent propagation over this connection.
    pub last_signal_tick: u64,
    /// Payload bits that trigger this connection.
    pub trigger_mask: u8,
    /// Response pattern applied by downstream consumers.
    pub response_pattern: u8,
}

/// A signal in flight between two actors.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntanglementSignal {
    /// Originating actor slot.
    pub source: ActorSlot,
    /// Destination actor slot.
    pub target: ActorSlot,
    /// 8-bit causal payload.
    pub payload: u8,
    /// Remaining hop budget.
    pub hop_count: u8,
    /// Signal state flags.
    pub flags: u8,
    /// Slots visited so far, one bit per slot index mod 64.
    pub propagation_vector: u64,
}

/// Per-domain signal propagation fabric.
#[derive(Debug)]
pub struct EntanglementOracle {
    connections: Vec<EntanglementConnection>,
    ring: Box<[EntanglementSignal; SIGNAL_RING_CAPACITY]>,
    head: usize,
    tail: usize,
    queued: usize,
    /// One bit per actor slot that sources at least one connection.
    entangled_mask: u64,
    /// One bit per eligible actor slot still dormant for dark activation.
    dark_triple_mask: u64,
    current_tick: u64,
    metrics: OracleMetrics,
}

impl Default for EntanglementOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl EntanglementOracle {
    /// Creates an oracle with zeroed state.
    pub fn new() -> Self {
        Self {
            connections: Vec::new(),
            ring: Box::new([EntanglementSignal::default(); SIGNAL_RING_CAPACITY]),
            head: 0,
            tail: 0,
            queued: 0,
            entangled_mask: 0,
            dark_triple_mask: 0,
            current_tick: 0,
            metrics: OracleMetrics::default(),
        }
    }

    /// Append a connection.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past 64 connections.
    pub fn create(&mut self, source: ActorSlot, target: ActorSlot, trigger_mask: u8) -> Result<()> {
        if self.connections.len() >= MAX_CONNECTIONS {
            return Err(RuntimeError::CapacityExceeded {
                what: "entanglement connections",
                capacity: MAX_CONNECTIONS,
            });
        }
        self.connections.push(EntanglementConnection {
            source,
            target,
            hop_count: 0,
            signal_strength: u8::MAX,
            flags: FLAG_ACTIVE,
            last_signal_tick: 0,
            trigger_mask,
            response_pattern: 0,
        });
        self.entangled_mask |= 1u64 << (source.index() % 64);
        Ok(())
    }

    /// Record the current tick for `last_signal_tick` stamping.
    ///
    /// Called by the owning scheduler at the start of each tick, before
    /// any propagation.
    pub fn begin_tick(&mut self, tick: u64) {
        self.current_tick = tick;
    }

    /// Propagate a payload from a source slot.
    ///
    /// Scans up to eight connections; every connection whose source and
    /// trigger mask match enqueues one signal carrying `max_hops - 1`
    /// remaining hops. `max_hops` outside `1..=8` rejects the call and
    /// counts it. Returns the number of signals enqueued.
    pub fn propagate_signal(&mut self, source: ActorSlot, payload: u8, max_hops: u8) -> u32 {
        if max_hops == 0 || max_hops > MAX_SIGNAL_HOPS {
            self.metrics.bounded_rejections += 1;
            return 0;
        }
        self.enqueue_matching(source, payload, max_hops - 1, 1u64 << (source.index() % 64))
    }

    /// Enqueue one signal per matching connection with an exact remaining
    /// hop budget. Shared by external propagation and re-propagation.
    fn enqueue_matching(
        &mut self,
        source: ActorSlot,
        payload: u8,
        remaining_hops: u8,
        propagation_vector: u64,
    ) -> u32 {
        let mut enqueued = 0u32;
        let tick = self.current_tick;
        for index in 0..self.connections.len().min(PROPAGATE_SCAN) {
            let conn = &mut self.connections[index];
            if conn.source != source || (conn.trigger_mask & payload) == 0 {
                continue;
            }
            conn.last_signal_tick = tick;
            conn.hop_count = remaining_hops;
            let target = conn.target;

            if self.queued >= SIGNAL_RING_CAPACITY {
                self.metrics.bounded_rejections += 1;
                continue;
            }
            self.ring[self.head] = EntanglementSignal {
                source,
                target,
                payload,
                hop_count: remaining_hops,
                flags: FLAG_ACTIVE,
                propagation_vector: propagation_vector | (1u64 << (target.index() % 64)),
            };
            self.head = (self.head + 1) % SIGNAL_RING_CAPACITY;
            self.queued += 1;
            enqueued += 1;
        }
        self.metrics.signals_propagated += enqueued as u64;
        trace!(%source, payload, remaining_hops, enqueued, "entanglement propagated");
        enqueued
    }

    /// Drain and apply up to eight queued signals.
    ///
    /// Each drained signal is bounds-checked (`0 < hop_count <= 8`),
    /// applied to its target's meaning, checked against the dark mask,
    /// and re-propagated from the target while hops remain. Returns the
    /// number of signals drained.
    pub fn process_signals<P: ActorPool + ?Sized>(&mut self, actors: &mut P) -> u32 {
        let mut drained = 0u32;
        for _ in 0..PROCESS_DRAIN {
            if self.queued == 0 {
                break;
            }
            let signal = self.ring[self.tail];
            self.tail = (self.tail + 1) % SIGNAL_RING_CAPACITY;
            self.queued -= 1;
            drained += 1;

            if signal.hop_count == 0 || signal.hop_count > MAX_SIGNAL_HOPS {
                self.metrics.bounded_rejections += 1;
                continue;
            }

            let target = signal.target.index();
            if let Some(actor) = actors.base_actor_mut(target) {
                actor.or_meaning(signal.payload);
            }

            if signal.payload & 0x80 != 0 && self.dark_triple_mask & (1u64 << (target % 64)) != 0 {
                self.dark_triple_mask &= !(1u64 << (target % 64));
                self.metrics.dark_activations += 1;
            }

            if signal.hop_count > 1 {
                self.enqueue_matching(
                    signal.target,
                    signal.payload,
                    signal.hop_count - 1,
                    signal.propagation_vector,
                );
            }
            self.metrics.signals_processed += 1;
        }
        drained
    }

    /// Flip up to four dormant slots to active where the actor's meaning
    /// covers the trigger payload. Returns the number activated.
    pub fn activate_dark_triples<P: ActorPool + ?Sized>(
        &mut self,
        actors: &mut P,
        trigger_payload: u8,
    ) -> u32 {
        let mut activated = 0u32;
        let mut scanned = 0usize;
        let mut mask = self.dark_triple_mask;
        while mask != 0 && scanned < DARK_SCAN {
            let slot = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            scanned += 1;

            let Some(actor) = actors.base_actor_mut(slot) else {
                continue;
            };
            if actor.meaning() & trigger_payload == trigger_payload {
                actor.or_meaning(0x80);
                self.dark_triple_mask &= !(1u64 << slot);
                self.metrics.dark_activations += 1;
                activated += 1;
            }
        }
        activated
    }

    /// Mark an actor slot as dormant-eligible for dark activation.
    pub fn mark_dark(&mut self, slot: ActorSlot) {
        self.dark_triple_mask |= 1u64 << (slot.index() % 64);
    }

    /// The dormant-eligibility mask.
    pub fn dark_triple_mask(&self) -> u64 {
        self.dark_triple_mask
    }

    /// Bitset of slots that source at least one connection.
    pub fn entangled_mask(&self) -> u64 {
        self.entangled_mask
    }

    /// Reset the ring to empty. Constant time.
    pub fn flush_signals(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.queued = 0;
    }

    /// Signals currently queued in the ring.
    pub fn queued(&self) -> usize {
        self.queued
    }

    /// Installed connection count.
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Connection table (diagnostics).
    pub fn connections(&self) -> &[EntanglementConnection] {
        &self.connections
    }

    /// Peek the signal at the ring tail without draining it.
    pub fn peek_tail(&self) -> Option<&EntanglementSignal> {
        (self.queued > 0).then(|| &self.ring[self.tail])
    }

    /// Oracle counters.
    pub fn metrics(&self) -> &OracleMetrics {
        &self.metrics
    }
}
