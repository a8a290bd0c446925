//! Learning matrix - tick scheduling for learning actors.
//!
//! The learning matrix drives a pool of learning actors through the same
//! per-tick sequence as the base matrix — feed update, extended hot path,
//! extended cognitive cycle, entanglement drain — with the learning step
//! folded into each actor's hot path. Setup operations (pattern
//! management, mode changes, sharing) go through the matrix so a single
//! owner serializes them against ticks.

use std::sync::Arc;

use tracing::info;

use bitactor_aot::Manifest;
use bitactor_foundation::{
    ActorSlot, CounterSource, CycleSource, DomainId, PatternId, MAX_ACTORS_PER_DOMAIN,
};
use bitactor_runtime::{
    BitActor, EntanglementOracle, FeedActor, MatrixConfig, NullSink, PerformanceCounters,
    Result, RuntimeError, TelemetrySink,
};

use crate::actor::{LearningActor, LearningMode};
use crate::cognitive::{execute_extended_cycle, LearningMetrics};

use bitactor_foundation::ActorRef;
use bitactor_runtime::entanglement::ActorPool;

/// Local newtype so the foreign [`ActorPool`] trait can be implemented
/// over a slice of learning actors (orphan rules forbid implementing it
/// for `[LearningActor]` directly).
struct LearningPool<'a>(&'a mut [LearningActor]);

impl ActorPool for LearningPool<'_> {
    fn actor_count(&self) -> usize {
        self.0.len()
    }

    fn base_actor_mut(&mut self, index: usize) -> Option<&mut BitActor> {
        self.0.get_mut(index).map(LearningActor::base_mut)
    }
}

/// Scheduler over a pool of learning actors.
///
/// Structurally a single-domain matrix: one feed, one oracle, up to 256
/// actors. The learning domain id is fixed at zero.
pub struct LearningMatrix {
    actors: Vec<LearningActor>,
    feed: FeedActor,
    oracle: EntanglementOracle,
    global_tick: u64,
    performance: PerformanceCounters,
    learning_metrics: LearningMetrics,
    cycles: Box<dyn CycleSource>,
    sink: Box<dyn TelemetrySink>,
    config: MatrixConfig,
}

impl Default for LearningMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningMatrix {
    /// Creates a learning matrix with the deterministic counter source,
    /// a null telemetry sink, and default configuration.
    pub fn new() -> Self {
        Self::with_instruments(
            Box::new(CounterSource::new()),
            Box::new(NullSink),
            MatrixConfig::default(),
        )
    }

    /// Creates a learning matrix with injected instruments.
    pub fn with_instruments(
        cycles: Box<dyn CycleSource>,
        sink: Box<dyn TelemetrySink>,
        config: MatrixConfig,
    ) -> Self {
        info!("learning matrix created");
        Self {
            actors: Vec::new(),
            feed: FeedActor::new(),
            oracle: EntanglementOracle::new(),
            global_tick: 0,
            performance: PerformanceCounters::default(),
            learning_metrics: LearningMetrics::default(),
            cycles,
            sink,
            config,
        }
    }

    /// Instantiate a learning actor from a manifest.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past 256 actors.
    pub fn add_ls_actor(&mut self, meaning: u8, manifest: &Arc<Manifest>) -> Result<ActorSlot> {
        if self.actors.len() >= MAX_ACTORS_PER_DOMAIN {
            return Err(RuntimeError::CapacityExceeded {
                what: "learning actors",
                capacity: MAX_ACTORS_PER_DOMAIN,
            });
        }
        let slot = self.actors.len();
        self.actors
            .push(LearningActor::new(BitActor::new(meaning, manifest.clone())));
        Ok(ActorSlot::new(slot as u16))
    }

    /// Set an actor's learning mode.
    pub fn set_learning_mode(&mut self, slot: ActorSlot, mode: LearningMode) -> Result<()> {
        self.actor_mut_checked(slot)?.set_mode(mode);
        Ok(())
    }

    /// Install a pattern on an actor.
    pub fn add_pattern(
        &mut self,
        slot: ActorSlot,
        data: &[u8],
        initial_confidence: f32,
    ) -> Result<PatternId> {
        let now = self.global_tick;
        self.actor_mut_checked(slot)?
            .add_pattern(data, initial_confidence, now)
    }

    /// Run discovery over a history for an actor; returns installed count.
    pub fn discover_patterns(
        &mut self,
        slot: ActorSlot,
        history: &[u8],
        window: usize,
    ) -> Result<usize> {
        let now = self.global_tick;
        Ok(self
            .actor_mut_checked(slot)?
            .discover_patterns(history, window, now))
    }

    /// Adapt a pattern on an actor toward new data.
    pub fn adapt_pattern(
        &mut self,
        slot: ActorSlot,
        id: PatternId,
        new_data: &[u8],
        feedback: f32,
    ) -> Result<()> {
        self.actor_mut_checked(slot)?
            .adapt_pattern(id, new_data, feedback);
        Ok(())
    }

    /// Copy a pattern from one actor to another.
    ///
    /// The copy's activation state is reset; the source is untouched.
    ///
    /// # Errors
    ///
    /// Addressing errors for either slot, or
    /// [`RuntimeError::CapacityExceeded`] if the target is full.
    pub fn share_pattern(
        &mut self,
        source: ActorSlot,
        target: ActorSlot,
        id: PatternId,
    ) -> Result<PatternId> {
        let now = self.global_tick;
        let pattern = self
            .actor_checked(source)?
            .pattern(id)
            .ok_or(RuntimeError::NoSuchPattern {
                actor: self.actor_ref(source),
                pattern: id,
            })?
            .shared_copy(now);
        self.actor_mut_checked(target)?.install_shared(pattern)
    }

    /// Run one tick over the pool.
    ///
    /// Returns the number of actors executed.
    pub fn tick(&mut self, signals: &[u64]) -> u32 {
        self.global_tick += 1;
        let tick = self.global_tick;
        let mut executed = 0u32;

        self.feed.update(signals);
        self.oracle.begin_tick(tick);

        for slot_index in 0..self.actors.len() {
            let slot = ActorSlot::new(slot_index as u16);
            let actor_ref = self.actor_ref(slot);
            let actor = &mut self.actors[slot_index];

            if !signals.is_empty() {
                actor.base_mut().set_signal_pending();
            }
            let elapsed =
                actor.execute_hot_path_ls(actor_ref, tick, &*self.cycles, &mut *self.sink);
            self.performance
                .record(elapsed, self.config.sub_100ns_threshold);

            execute_extended_cycle(
                actor,
                slot,
                &mut self.oracle,
                &self.feed,
                &mut self.learning_metrics,
                tick,
            );
            executed += 1;
        }

        self.oracle
            .process_signals(&mut LearningPool(self.actors.as_mut_slice()));
        executed
    }

    /// Current global tick.
    pub fn global_tick(&self) -> u64 {
        self.global_tick
    }

    /// Pool size.
    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// A learning actor by slot.
    pub fn actor(&self, slot: ActorSlot) -> Option<&LearningActor> {
        self.actors.get(slot.index())
    }

    /// A mutable learning actor by slot.
    pub fn actor_mut(&mut self, slot: ActorSlot) -> Option<&mut LearningActor> {
        self.actors.get_mut(slot.index())
    }

    /// The pool's feed actor, mutable (setup).
    pub fn feed_mut(&mut self) -> &mut FeedActor {
        &mut self.feed
    }

    /// The pool's oracle, mutable (setup).
    pub fn oracle_mut(&mut self) -> &mut EntanglementOracle {
        &mut self.oracle
    }

    /// Execution counters.
    pub fn performance(&self) -> &PerformanceCounters {
        &self.performance
    }

    /// Learning-layer counters.
    pub fn learning_metrics(&self) -> &LearningMetrics {
        &self.learning_metrics
    }

    fn actor_ref(&self, slot: ActorSlot) -> ActorRef {
        ActorRef::new(DomainId::new(0), slot)
    }

    fn actor_checked(&self, slot: ActorSlot) -> Result<&LearningActor> {
        self.actors
            .get(slot.index())
            .ok_or(RuntimeError::NoSuchActor(self.actor_ref(slot)))
    }

    fn actor_mut_checked(&mut self, slot: ActorSlot) -> Result<&mut LearningActor> {
        let actor_ref = self.actor_ref(slot);
        self.actors
            .get_mut(slot.index())
            .ok_or(RuntimeError::NoSuchActor(actor_ref))
    }
}
