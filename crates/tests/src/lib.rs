//! Integration test harness for the BitActor stack.
//!
//! This crate provides utilities for end-to-end testing of the full
//! pipeline: Compile → Assemble → Tick → Verify. The harness wires a
//! matrix to a recording telemetry sink and keeps a shared handle on it,
//! so tests can assert on emitted spans after driving ticks.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use bitactor_aot::Manifest;
use bitactor_foundation::{ActorRef, CycleSource, DomainId};
use bitactor_runtime::{BitActor, Domain, Matrix, MatrixConfig, RecordingSink};

/// A cycle source that advances by a fixed stride per reading.
///
/// With a stride above the trinity budget every measured operation
/// breaches it, which is how tests force budget-violation paths
/// deterministically.
#[derive(Debug)]
pub struct StridedSource {
    counter: std::cell::Cell<u64>,
    stride: u64,
}

impl StridedSource {
    /// Creates a source advancing by `stride` per reading.
    pub fn new(stride: u64) -> Self {
        Self {
            counter: std::cell::Cell::new(0),
            stride,
        }
    }
}

impl CycleSource for StridedSource {
    fn now(&self) -> u64 {
        let value = self.counter.get();
        self.counter.set(value + self.stride);
        value
    }
}

/// Test harness for driving a matrix compiled from one specification.
pub struct TestHarness {
    matrix: Matrix,
    domain: DomainId,
    manifest: Arc<Manifest>,
    sink: Rc<RefCell<RecordingSink>>,
}

impl TestHarness {
    /// Create a harness from specification text: compiled manifest, one
    /// domain, a recording sink, and the deterministic counter source.
    ///
    /// # Panics
    ///
    /// Panics if compilation fails.
    pub fn from_spec(spec: &str) -> Self {
        Self::with_cycle_source(spec, Box::new(bitactor_foundation::CounterSource::new()))
    }

    /// Create a harness with an injected cycle source.
    ///
    /// # Panics
    ///
    /// Panics if compilation fails.
    pub fn with_cycle_source(spec: &str, cycles: Box<dyn CycleSource>) -> Self {
        let manifest = bitactor_aot::compile(spec).expect("compilation failed");
        let sink = Rc::new(RefCell::new(RecordingSink::new()));
        let mut matrix =
            Matrix::with_instruments(cycles, Box::new(Rc::clone(&sink)), MatrixConfig::default());
        let domain = matrix.create_domain().expect("domain creation failed");
        Self {
            matrix,
            domain,
            manifest,
            sink,
        }
    }

    /// Add an actor to the harness domain.
    pub fn add_actor(&mut self, meaning: u8, name: Option<&str>) -> ActorRef {
        let manifest = self.manifest.clone();
        self.matrix
            .add_actor(self.domain, meaning, &manifest, name)
            .expect("actor creation failed")
    }

    /// Install a feed pattern on the harness domain; returns the pattern
    /// hash to feed back as a matching signal.
    pub fn add_feed_pattern(&mut self, pattern_text: &str) -> u64 {
        let pattern = bitactor_aot::NanoRegex::compile(pattern_text).expect("pattern failed");
        let hash = pattern.pattern_hash();
        self.domain_mut().feed_mut().add_pattern(pattern).unwrap();
        hash
    }

    /// Execute a single tick.
    pub fn tick(&mut self, signals: &[u64]) -> u32 {
        self.matrix.tick(signals)
    }

    /// Execute multiple empty ticks.
    pub fn run_ticks(&mut self, count: u64) {
        for _ in 0..count {
            self.matrix.tick(&[]);
        }
    }

    /// The compiled manifest behind every harness actor.
    pub fn manifest(&self) -> &Arc<Manifest> {
        &self.manifest
    }

    /// An actor by reference.
    ///
    /// # Panics
    ///
    /// Panics if the reference does not address a harness actor.
    pub fn actor(&self, actor: ActorRef) -> &BitActor {
        self.matrix.actor(actor).expect("no such actor")
    }

    /// The harness domain.
    pub fn domain(&self) -> &Domain {
        self.matrix.domain(self.domain).unwrap()
    }

    /// The harness domain, mutable.
    pub fn domain_mut(&mut self) -> &mut Domain {
        self.matrix.domain_mut(self.domain).unwrap()
    }

    /// The harness domain id.
    pub fn domain_id(&self) -> DomainId {
        self.domain
    }

    /// The underlying matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    /// The underlying matrix, mutable.
    pub fn matrix_mut(&mut self) -> &mut Matrix {
        &mut self.matrix
    }

    /// Inspect the recording sink.
    pub fn sink(&self) -> std::cell::Ref<'_, RecordingSink> {
        self.sink.borrow()
    }
}
