//! Dark Triple System - dormant reactive patterns.
//!
//! A dark triple is a reactive pattern that lies dormant until enough
//! matching signals accumulate, then activates by mutating its target
//! actor: the dormant pattern is ORed into the meaning, a pending signal
//! is raised, and the triple's slot bit is merged into the causal vector.
//! Activation is state mutation, never I/O.
//!
//! The system is orthogonal to the oracle's per-slot dark mask: triples
//! are structured records with thresholds and ageing, pooled at the
//! matrix level, and addressed by [`ActorRef`] across domains.
//!
//! # Conservation
//!
//! The dormant and active masks are complementary over registered slots:
//! `popcount(dormant) + popcount(active) == triple_count`, always.

use tracing::debug;

use bitactor_foundation::{ActorRef, TripleSlot, MAX_DARK_TRIPLES};

use crate::domain::Domain;
use crate::error::{Result, RuntimeError};
use crate::metrics::DarkTripleMetrics;

/// Dormant triples examined per processed signal.
const DORMANT_SCAN: usize = 4;

/// A dormant reactive pattern bound to a target actor.
#[derive(Debug, Clone, Copy)]
pub struct DarkTriple {
    /// Pattern ORed into the target's meaning on activation.
    pub dormant_pattern: u8,
    /// Bits of the incoming signal compared against the pattern.
    pub activation_mask: u8,
    /// Actor mutated on activation.
    pub target: ActorRef,
    /// Matching signals required before activation.
    pub activation_threshold: u8,
    /// Matching signals accumulated while dormant.
    pub current_signal_count: u8,
    /// Cycle reading at the most recent activation.
    pub last_activation_cycle: u64,
    /// Whether the triple is currently active.
    pub is_active: bool,
}

/// Pool of dark triples with complementary dormant/active masks.
#[derive(Debug, Default)]
pub struct DarkTripleSystem {
    triples: Vec<DarkTriple>,
    dormant_mask: u64,
    active_mask: u64,
    metrics: DarkTripleMetrics,
}

impl DarkTripleSystem {
    /// Creates an empty system.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dormant triple and return its slot.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past 64 triples.
    pub fn register(
        &mut self,
        dormant_pattern: u8,
        activation_mask: u8,
        target: ActorRef,
        activation_threshold: u8,
    ) -> Result<TripleSlot> {
        if self.triples.len() >= MAX_DARK_TRIPLES {
            return Err(RuntimeError::CapacityExceeded {
                what: "dark triples",
                capacity: MAX_DARK_TRIPLES,
            });
        }
        let slot = self.triples.len();
        self.triples.push(DarkTriple {
            dormant_pattern,
            activation_mask,
            target,
            activation_threshold,
            current_signal_count: 0,
            last_activation_cycle: 0,
            is_active: false,
        });
        self.dormant_mask |= 1u64 << slot;
        debug!(slot, %target, "dark triple registered");
        Ok(TripleSlot::new(slot as u8))
    }

    /// Offer one signal to the dormant pool.
    ///
    /// Scans up to four dormant triples; each whose masked pattern equals
    /// the masked signal accumulates one count, and a count reaching the
    /// threshold activates the triple against its target actor. Returns
    /// the number of activations.
    pub fn process_signal(&mut self, signal: u8, domains: &mut [Domain], now: u64) -> u32 {
        let mut activated = 0u32;
        let mut scanned = 0usize;
        let mut mask = self.dormant_mask;
        while mask != 0 && scanned < DORMANT_SCAN {
            let slot = mask.trailing_zeros() as usize;
            mask &= mask - 1;
            scanned += 1;

            let triple = &mut self.triples[slot];
            if signal & triple.activation_mask
                != triple.dormant_pattern & triple.activation_mask
            {
                continue;
            }
            triple.current_signal_count += 1;
            if triple.current_signal_count < triple.activation_threshold {
                continue;
            }

            triple.is_active = true;
            triple.last_activation_cycle = now;
            self.dormant_mask &= !(1u64 << slot);
            self.active_mask |= 1u64 << slot;
            self.metrics.total_activations += 1;
            activated += 1;

            let pattern = triple.dormant_pattern;
            let target = triple.target;
            if let Some(domain) = domains.get_mut(target.domain.index()) {
                if let Some(actor) = domain.actor_mut(target.slot) {
                    actor.or_meaning(pattern);
                    actor.set_signal_pending();
                    actor.or_causal_vector(1u64 << slot);
                    if actor.meaning() & 0x80 != 0 {
                        actor.or_meaning(0x40);
                    }
                }
            }
            debug!(slot, %target, pattern, "dark triple activated");
        }
        activated
    }

    /// Deactivate actives older than `max_age` cycles.
    ///
    /// Deactivation resets the signal count and returns the triple to the
    /// dormant pool; the target actor keeps whatever meaning the
    /// activation gave it.
    pub fn expire_aged(&mut self, now: u64, max_age: u64) -> u32 {
        let mut expired = 0u32;
        let mut mask = self.active_mask;
        while mask != 0 {
            let slot = mask.trailing_zeros() as usize;
            mask &= mask - 1;

            let triple = &mut self.triples[slot];
            if now.saturating_sub(triple.last_activation_cycle) <= max_age {
                continue;
            }
            triple.is_active = false;
            triple.current_signal_count = 0;
            self.active_mask &= !(1u64 << slot);
            self.dormant_mask |= 1u64 << slot;
            self.metrics.total_deactivations += 1;
            expired += 1;
        }
        expired
    }

    /// Registered triple count.
    pub fn triple_count(&self) -> usize {
        self.triples.len()
    }

    /// A registered triple by slot.
    pub fn triple(&self, slot: TripleSlot) -> Option<&DarkTriple> {
        self.triples.get(slot.index())
    }

    /// Bitset of dormant slots.
    pub fn dormant_mask(&self) -> u64 {
        self.dormant_mask
    }

    /// Bitset of active slots.
    pub fn active_mask(&self) -> u64 {
        self.active_mask
    }

    /// System counters.
    pub fn metrics(&self) -> &DarkTripleMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitactor_foundation::{ActorSlot, DomainId};

    fn domain_with_actors(n: u16) -> Domain {
        let manifest = bitactor_aot::compile("dark_test_spec").unwrap();
        let mut domain = Domain::new(DomainId::new(0));
        for _ in 0..n {
            domain.add_actor(0x00, &manifest).unwrap();
        }
        domain
    }

    fn target(slot: u16) -> ActorRef {
        ActorRef::new(DomainId::new(0), ActorSlot::new(slot))
    }

    #[test]
    fn test_threshold_one_activates_immediately() {
        let mut system = DarkTripleSystem::new();
        let mut domains = vec![domain_with_actors(3)];
        system.register(0x80, 0xFF, target(2), 1).unwrap();

        let activated = system.process_signal(0x80, &mut domains, 10);
        assert_eq!(activated, 1);
        assert_eq!(system.metrics().total_activations, 1);

        let actor = domains[0].actor(ActorSlot::new(2)).unwrap();
        assert_ne!(actor.meaning() & 0x80, 0);
        assert_ne!(actor.meaning() & 0x40, 0);
        assert!(actor.signal_pending());
        assert_ne!(actor.causal_vector() & 1, 0);
    }

    #[test]
    fn test_threshold_accumulates_across_signals() {
        let mut system = DarkTripleSystem::new();
        let mut domains = vec![domain_with_actors(1)];
        system.register(0x01, 0x0F, target(0), 3).unwrap();

        assert_eq!(system.process_signal(0x01, &mut domains, 1), 0);
        assert_eq!(system.process_signal(0x01, &mut domains, 2), 0);
        assert_eq!(system.process_signal(0x01, &mut domains, 3), 1);
    }

    #[test]
    fn test_masked_mismatch_does_not_accumulate() {
        let mut system = DarkTripleSystem::new();
        let mut domains = vec![domain_with_actors(1)];
        system.register(0x01, 0x0F, target(0), 1).unwrap();

        assert_eq!(system.process_signal(0x02, &mut domains, 1), 0);
        // High bits are outside the activation mask and must not matter.
        assert_eq!(system.process_signal(0xF1, &mut domains, 2), 1);
    }

    #[test]
    fn test_mask_conservation() {
        let mut system = DarkTripleSystem::new();
        let mut domains = vec![domain_with_actors(4)];
        for i in 0..4 {
            system.register(0x01, 0xFF, target(i), 1).unwrap();
        }

        system.process_signal(0x01, &mut domains, 5);
        let total =
            system.dormant_mask().count_ones() + system.active_mask().count_ones();
        assert_eq!(total as usize, system.triple_count());
    }

    #[test]
    fn test_expire_returns_triple_to_dormant() {
        let mut system = DarkTripleSystem::new();
        let mut domains = vec![domain_with_actors(1)];
        let slot = system.register(0x01, 0xFF, target(0), 1).unwrap();

        system.process_signal(0x01, &mut domains, 100);
        assert!(system.triple(slot).unwrap().is_active);

        assert_eq!(system.expire_aged(100 + 50, 10), 1);
        let triple = system.triple(slot).unwrap();
        assert!(!triple.is_active);
        assert_eq!(triple.current_signal_count, 0);
        assert_eq!(system.metrics().total_deactivations, 1);
    }

    #[test]
    fn test_capacity() {
        let mut system = DarkTripleSystem::new();
        for _ in 0..MAX_DARK_TRIPLES {
            system.register(0x01, 0xFF, target(0), 1).unwrap();
        }
        assert!(matches!(
            system.register(0x01, 0xFF, target(0), 1),
            Err(RuntimeError::CapacityExceeded { .. })
        ));
    }
}
