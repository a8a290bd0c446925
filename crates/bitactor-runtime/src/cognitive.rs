//! The 8-hop cognitive cycle.
//!
//! Every activated actor passes through the same fixed hop sequence each
//! tick. The sequence is inlined — hops are an ordered contract, not a
//! dispatch table — and each hop's outcome is the truth value of its
//! predicate shifted into the corresponding bit of the result word.
//!
//! # Hop Order
//!
//! 1. **TriggerDetect** - the domain's feed saw a pattern match this tick
//! 2. **OntologyLoad** - constant true, the ontology is AOT-baked
//! 3. **ShaclFire** - the constraint nibble is saturated
//! 4. **StateResolve** - meaning carries at least four set bits
//! 5. **CollapseCompute** - fold the high nibble; true iff nonzero result
//! 6. **ActionBind** - even causal vector emits an entanglement signal
//! 7. **StateCommit** - constant true, no persistence in the core
//! 8. **MetaValidate** - the actor is trinity-compliant

use bitactor_foundation::{ActorSlot, MAX_SIGNAL_HOPS};

use crate::actor::BitActor;
use crate::entanglement::EntanglementOracle;
use crate::feed::FeedActor;

/// The eight cognitive hops, in execution order.
///
/// The discriminant is the hop's bit position in the cycle result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Hop {
    /// Feed-actor pattern match seen this tick.
    TriggerDetect = 0,
    /// Ontology availability (AOT-baked, always true).
    OntologyLoad = 1,
    /// Constraint check on the low meaning nibble.
    ShaclFire = 2,
    /// Meaning population check.
    StateResolve = 3,
    /// High-nibble fold into the low nibble.
    CollapseCompute = 4,
    /// Entanglement emission on even causal vectors.
    ActionBind = 5,
    /// State commit (no-op in the core, always true).
    StateCommit = 6,
    /// Trinity-compliance validation.
    MetaValidate = 7,
}

impl Hop {
    /// All hops in execution order.
    pub const ALL: [Hop; 8] = [
        Hop::TriggerDetect,
        Hop::OntologyLoad,
        Hop::ShaclFire,
        Hop::StateResolve,
        Hop::CollapseCompute,
        Hop::ActionBind,
        Hop::StateCommit,
        Hop::MetaValidate,
    ];

    /// This hop's bit in a cycle result.
    pub const fn bit(self) -> u64 {
        1u64 << (self as u8)
    }
}

/// Run the eight hops for one actor.
///
/// `slot` is the actor's position in its domain pool, used as the
/// entanglement source address. Returns the cycle result: bit `n` set iff
/// hop `n` held. The same mask is stored on the actor for later
/// inspection.
pub fn execute_cognitive_cycle(
    actor: &mut BitActor,
    slot: ActorSlot,
    oracle: &mut EntanglementOracle,
    feed: &FeedActor,
) -> u64 {
    let mut result = 0u64;

    result |= ((feed.match_count() > 0) as u64) << (Hop::TriggerDetect as u8);
    result |= 1u64 << (Hop::OntologyLoad as u8);

    result |= (((actor.meaning() & 0x0F) == 0x0F) as u64) << (Hop::ShaclFire as u8);
    result |= ((actor.meaning().count_ones() >= 4) as u64) << (Hop::StateResolve as u8);

    let collapsed = actor.collapse();
    result |= ((collapsed != 0) as u64) << (Hop::CollapseCompute as u8);

    let emitted = if actor.causal_vector() % 2 == 0 {
        let payload = actor.meaning();
        oracle.propagate_signal(slot, payload, MAX_SIGNAL_HOPS)
    } else {
        0
    };
    result |= ((emitted > 0) as u64) << (Hop::ActionBind as u8);

    result |= 1u64 << (Hop::StateCommit as u8);
    result |= (actor.trinity_compliant() as u64) << (Hop::MetaValidate as u8);

    actor.set_hop_mask(result as u8);
    result
}
