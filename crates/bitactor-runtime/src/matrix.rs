//! Matrix - the top-level tick scheduler.
//!
//! The matrix owns up to eight domains and drives the global tick: feed
//! update, hot-path execution and cognitive cycle per active actor, one
//! entanglement drain per domain, then dark-triple signal processing. It
//! also owns the cross-domain services — registry, dark-triple system,
//! performance counters — and the injected cycle source and telemetry
//! sink.
//!
//! # Ordering
//!
//! Within a tick: feed update precedes every actor in its domain; each
//! actor's hot path precedes its cognitive cycle; all actors in a domain
//! precede that domain's entanglement drain. Actor slots ascend, domain
//! ids ascend. Across ticks only the global tick is ordered, strictly
//! monotonic by exactly one per call.
//!
//! # Concurrency
//!
//! One tick runs to completion on one thread. Parallelism is permitted at
//! the granularity of whole matrices (disjoint state); setup operations
//! never run concurrently with a tick on the same matrix.

use std::sync::Arc;

use tracing::{debug, info};

use bitactor_aot::Manifest;
use bitactor_foundation::{
    ActorRef, ActorSlot, CounterSource, CycleSource, DomainId, MAX_DOMAINS,
    SUB_100NS_CYCLE_THRESHOLD,
};

use crate::cognitive::execute_cognitive_cycle;
use crate::dark::DarkTripleSystem;
use crate::domain::Domain;
use crate::error::{Result, RuntimeError};
use crate::metrics::PerformanceCounters;
use crate::registry::Registry;
use crate::telemetry::{NullSink, TelemetrySink};

/// Matrix tunables.
///
/// Everything structural (pool sizes, hop bounds, budgets) is a
/// compile-time constant; this carries only the measured-performance
/// thresholds that legitimately vary by host.
#[derive(Debug, Clone)]
pub struct MatrixConfig {
    /// Cycle threshold under which an execution counts as sub-100ns.
    pub sub_100ns_threshold: u64,
    /// Cycle age past which an active dark triple returns to dormant.
    pub dark_triple_max_age: u64,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        Self {
            sub_100ns_threshold: SUB_100NS_CYCLE_THRESHOLD,
            dark_triple_max_age: 1_000_000,
        }
    }
}

/// Top-level scheduler over up to eight domains.
pub struct Matrix {
    domains: Vec<Domain>,
    domain_active_mask: u64,
    global_tick: u64,
    performance: PerformanceCounters,
    registry: Registry,
    dark: DarkTripleSystem,
    cycles: Box<dyn CycleSource>,
    sink: Box<dyn TelemetrySink>,
    config: MatrixConfig,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix {
    /// Creates a matrix with the deterministic counter source, a null
    /// telemetry sink, and default configuration.
    pub fn new() -> Self {
        Self::with_instruments(
            Box::new(CounterSource::new()),
            Box::new(NullSink),
            MatrixConfig::default(),
        )
    }

    /// Creates a matrix with injected cycle source, telemetry sink, and
    /// configuration.
    pub fn with_instruments(
        cycles: Box<dyn CycleSource>,
        sink: Box<dyn TelemetrySink>,
        config: MatrixConfig,
    ) -> Self {
        info!(
            sub_100ns_threshold = config.sub_100ns_threshold,
            "matrix created"
        );
        Self {
            domains: Vec::new(),
            domain_active_mask: 0,
            global_tick: 0,
            performance: PerformanceCounters::default(),
            registry: Registry::new(),
            dark: DarkTripleSystem::new(),
            cycles,
            sink,
            config,
        }
    }

    /// Create a domain and return its id.
    ///
    /// # Errors
    ///
    /// [`RuntimeError::CapacityExceeded`] past eight domains.
    pub fn create_domain(&mut self) -> Result<DomainId> {
        if self.domains.len() >= MAX_DOMAINS {
            return Err(RuntimeError::CapacityExceeded {
                what: "matrix domains",
                capacity: MAX_DOMAINS,
            });
        }
        let id = DomainId::new(self.domains.len() as u8);
        self.domains.push(Domain::new(id));
        self.domain_active_mask |= 1u64 << id.index();
        debug!(%id, "domain created");
        Ok(id)
    }

    /// Instantiate an actor in a domain, optionally binding a registry
    /// name, and return its full reference.
    ///
    /// # Errors
    ///
    /// Domain addressing, pool capacity, and registry errors propagate
    /// unchanged; a failed name binding leaves no actor behind it
    /// half-registered (the actor exists, the name does not).
    pub fn add_actor(
        &mut self,
        domain_id: DomainId,
        meaning: u8,
        manifest: &Arc<Manifest>,
        name: Option<&str>,
    ) -> Result<ActorRef> {
        let domain = self
            .domains
            .get_mut(domain_id.index())
            .ok_or(RuntimeError::NoSuchDomain(domain_id))?;
        let slot = domain.add_actor(meaning, manifest)?;
        let actor = ActorRef::new(domain_id, slot);
        if let Some(name) = name {
            self.registry.register(name, actor)?;
        }
        Ok(actor)
    }

    /// Run one tick over all active domains.
    ///
    /// Returns the number of actors executed.
    pub fn tick(&mut self, signals: &[u64]) -> u32 {
        self.global_tick += 1;
        let tick = self.global_tick;
        let mut executed = 0u32;

        for domain_index in 0..self.domains.len() {
            if self.domain_active_mask & (1u64 << domain_index) == 0 {
                continue;
            }
            let domain = &mut self.domains[domain_index];
            let domain_id = domain.id();
            domain.feed_mut().update(signals);
            domain.oracle_mut().begin_tick(tick);

            let mut mask = domain.active_mask();
            let (actors, oracle, feed) = domain.parts_mut();
            while mask != 0 {
                let slot_index = mask.trailing_zeros() as usize;
                mask &= mask - 1;
                let slot = ActorSlot::new(slot_index as u16);
                let actor_ref = ActorRef::new(domain_id, slot);

                let actor = &mut actors[slot_index];
                if !signals.is_empty() {
                    actor.set_signal_pending();
                }
                let elapsed =
                    actor.execute_hot_path(actor_ref, tick, &*self.cycles, &mut *self.sink);
                self.performance
                    .record(elapsed, self.config.sub_100ns_threshold);

                execute_cognitive_cycle(actor, slot, oracle, feed);
                executed += 1;
            }

            domain.process_entanglement();
        }

        let now = self.cycles.now();
        for &signal in signals {
            self.dark.process_signal(signal as u8, &mut self.domains, now);
        }
        self.dark.expire_aged(now, self.config.dark_triple_max_age);

        executed
    }

    /// Current global tick.
    pub fn global_tick(&self) -> u64 {
        self.global_tick
    }

    /// Created domain count.
    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    /// Bitset of domains scheduled per tick.
    pub fn domain_active_mask(&self) -> u64 {
        self.domain_active_mask
    }

    /// A domain by id.
    pub fn domain(&self, id: DomainId) -> Option<&Domain> {
        self.domains.get(id.index())
    }

    /// A mutable domain by id (setup: feeds, oracles, activation).
    pub fn domain_mut(&mut self, id: DomainId) -> Option<&mut Domain> {
        self.domains.get_mut(id.index())
    }

    /// An actor by full reference.
    pub fn actor(&self, actor: ActorRef) -> Option<&crate::actor::BitActor> {
        self.domain(actor.domain).and_then(|d| d.actor(actor.slot))
    }

    /// A mutable actor by full reference.
    pub fn actor_mut(&mut self, actor: ActorRef) -> Option<&mut crate::actor::BitActor> {
        self.domain_mut(actor.domain)
            .and_then(|d| d.actor_mut(actor.slot))
    }

    /// The symbolic registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The symbolic registry, mutable (setup).
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// The dark-triple system.
    pub fn dark_triples(&self) -> &DarkTripleSystem {
        &self.dark
    }

    /// The dark-triple system, mutable (setup: registration).
    pub fn dark_triples_mut(&mut self) -> &mut DarkTripleSystem {
        &mut self.dark
    }

    /// Execution counters.
    pub fn performance(&self) -> &PerformanceCounters {
        &self.performance
    }

    /// Matrix configuration.
    pub fn config(&self) -> &MatrixConfig {
        &self.config
    }
}
