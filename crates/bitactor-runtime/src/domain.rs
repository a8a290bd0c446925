//! Actor containers.
//!
//! A domain owns a pool of up to 256 actors, one feed actor, and one
//! entanglement oracle. The first 64 pool slots are schedulable: a slot
//! executes in a tick iff its bit is set in the domain's active mask.
//! Domains are owned by exactly one matrix and never share actors.

use std::sync::Arc;

use tracing::debug;

use bitactor_aot::Manifest;
use bitactor_foundation::{ActorSlot, DomainId, MAX_ACTIVE_SLOTS, MAX_ACTORS_PER_DOMAIN};

use crate::actor::BitActor;
use crate::entanglement::EntanglementOracle;
use crate::error::{Result, RuntimeError};
use crate::feed::FeedActor;

/// Container of actors plus their input feed and causal fabric.
#[derive(Debug)]
pub struct Domain {
    id: DomainId,
    active_mask: u64,
    actors: Vec<BitActor>,
    feed: FeedActor,
    oracle: EntanglementOracle,
}

impl Domain {
    /// Creates an empty domain.
    pub fn new(id: DomainId) -> Self {
        Self {
            id,
            active_mask: 0,
            actors: Vec::new(),
            feed: FeedActor::new(),
            oracle: EntanglementOracle::new(),
        }
    }

    /// This domain's id within its matrix.
    pub fn id(&self) -> DomainId {
        self.id
    }

    /// Instantiate an actor from a manifest and return its slot.
    ///
    /// Slots below 64 are marked active and scheduled every tick; higher
    /// slots exist in the pool but stay outside the active mask.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past 256 actors.
    pub fn add_actor(&mut self, meaning: u8, manifest: &Arc<Manifest>) -> Result<ActorSlot> {
        if self.actors.len() >= MAX_ACTORS_PER_DOMAIN {
            return Err(RuntimeError::CapacityExceeded {
                what: "domain actors",
                capacity: MAX_ACTORS_PER_DOMAIN,
            });
        }
        let slot = self.actors.len();
        self.actors.push(BitActor::new(meaning, manifest.clone()));
        if slot < MAX_ACTIVE_SLOTS {
            self.active_mask |= 1u64 << slot;
        }
        debug!(domain = %self.id, slot, "actor added");
        Ok(ActorSlot::new(slot as u16))
    }

    /// Bitset of actively scheduled slots.
    pub fn active_mask(&self) -> u64 {
        self.active_mask
    }

    /// Remove a slot from scheduling without destroying the actor.
    pub fn deactivate(&mut self, slot: ActorSlot) {
        if slot.index() < MAX_ACTIVE_SLOTS {
            self.active_mask &= !(1u64 << slot.index());
        }
    }

    /// Return a slot to scheduling.
    pub fn activate(&mut self, slot: ActorSlot) {
        if slot.index() < MAX_ACTIVE_SLOTS && slot.index() < self.actors.len() {
            self.active_mask |= 1u64 << slot.index();
        }
    }

    /// Actor count in the pool.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// An actor by slot.
    pub fn actor(&self, slot: ActorSlot) -> Option<&BitActor> {
        self.actors.get(slot.index())
    }

    /// A mutable actor by slot.
    pub fn actor_mut(&mut self, slot: ActorSlot) -> Option<&mut BitActor> {
        self.actors.get_mut(slot.index())
    }

    /// The domain's feed actor.
    pub fn feed(&self) -> &FeedActor {
        &self.feed
    }

    /// The domain's feed actor, mutable (setup: pattern installation).
    pub fn feed_mut(&mut self) -> &mut FeedActor {
        &mut self.feed
    }

    /// The domain's entanglement oracle.
    pub fn oracle(&self) -> &EntanglementOracle {
        &self.oracle
    }

    /// The domain's entanglement oracle, mutable (setup: connections).
    pub fn oracle_mut(&mut self) -> &mut EntanglementOracle {
        &mut self.oracle
    }

    /// Drain and apply queued entanglement signals for this domain.
    pub fn process_entanglement(&mut self) -> u32 {
        self.oracle.process_signals(self.actors.as_mut_slice())
    }

    /// Split borrows for the cognitive executor: actor pool, oracle, feed.
    pub(crate) fn parts_mut(&mut self) -> (&mut [BitActor], &mut EntanglementOracle, &FeedActor) {
        let Self {
            actors,
            oracle,
            feed,
            ..
        } = self;
        (actors.as_mut_slice(), oracle, &*feed)
    }
}
