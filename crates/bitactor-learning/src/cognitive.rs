//! Cognitive cycle extension - hops 8 through 10.
//!
//! Learning actors run the base 8-hop cycle unchanged, then three
//! extension hops: Observe (pattern recognition against the current
//! meaning), Adapt (fold accumulated activations into confidence), and
//! Validate (trinity-compliance accounting). Extension results pack into
//! bits 8-10 above the base cycle's bits 0-7.

use serde::{Deserialize, Serialize};

use bitactor_foundation::ActorSlot;
use bitactor_runtime::{execute_cognitive_cycle, EntanglementOracle, FeedActor};

use crate::actor::LearningActor;

/// The three extension hops, in execution order.
///
/// The discriminant is the hop's bit position in the extended cycle
/// result, continuing the base cycle's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ExtendedHop {
    /// Pattern recognition against the current meaning.
    Observe = 8,
    /// Confidence refresh from accumulated activations.
    Adapt = 9,
    /// Trinity-compliance validation and violation accounting.
    Validate = 10,
}

impl ExtendedHop {
    /// All extension hops in execution order.
    pub const ALL: [ExtendedHop; 3] =
        [ExtendedHop::Observe, ExtendedHop::Adapt, ExtendedHop::Validate];

    /// This hop's bit in an extended cycle result.
    pub const fn bit(self) -> u64 {
        1u64 << (self as u8)
    }
}

/// Learning-layer counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningMetrics {
    /// Validate-hop failures: cycles that found their actor non-compliant.
    pub validation_violations: u64,
}

/// Run the base cycle plus the three extension hops for one actor.
///
/// Returns the extended result: base hop bits 0-7 plus extension bits
/// 8-10.
pub fn execute_extended_cycle(
    actor: &mut LearningActor,
    slot: ActorSlot,
    oracle: &mut EntanglementOracle,
    feed: &FeedActor,
    metrics: &mut LearningMetrics,
    now: u64,
) -> u64 {
    let mut result = execute_cognitive_cycle(actor.base_mut(), slot, oracle, feed);

    let meaning = actor.base().meaning();
    let observed = actor
        .patterns()
        .iter()
        .filter(|p| p.valid() && (p.pattern_hash() & 0xFF) as u8 == meaning)
        .count();
    result |= ((observed > 0) as u64) << (ExtendedHop::Observe as u8);

    let adapted = actor.refresh_adaptations(now);
    result |= (adapted as u64) << (ExtendedHop::Adapt as u8);

    let compliant = actor.base().trinity_compliant();
    if !compliant {
        metrics.validation_violations += 1;
    }
    result |= (compliant as u64) << (ExtendedHop::Validate as u8);

    result
}
