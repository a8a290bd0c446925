//! BitActor Runtime.
//!
//! This crate provides the causal execution engine for the BitActor
//! stack. It takes compiled manifests from `bitactor-aot` and drives
//! actors tick by tick through the 8-hop cognitive cycle, propagating
//! bounded entanglement signals and activating dormant dark triples.
//!
//! # Architecture
//!
//! - [`actor`] - the BitActor record and its 8-cycle hot path
//! - [`cognitive`] - the fixed 8-hop cognitive cycle
//! - [`feed`] - per-domain signal triage via NanoRegex patterns
//! - [`domain`] - actor pools with active-slot scheduling masks
//! - [`matrix`] - the top-level tick scheduler and runtime context
//! - [`entanglement`] - bounded-hop causal signal propagation
//! - [`dark`] - dormant reactive patterns with activation thresholds
//! - [`registry`] - symbolic name → actor addressing
//! - [`telemetry`] - the span-sink boundary consumed by the core
//! - [`metrics`] - measured-cost counters for soft failures
//! - [`error`] - hard setup failures
//!
//! # Execution Model
//!
//! Each `Matrix::tick` pass, per active domain in ascending id order:
//!
//! 1. The feed actor converts raw signals into a per-tick match count
//! 2. Each active actor, ascending slot order, runs the hot path and
//!    then the cognitive cycle
//! 3. The domain's oracle drains queued entanglement signals once
//!
//! After the domain pass, incoming signals are offered to the dark-triple
//! pool and aged-out actives are returned to dormancy.
//!
//! # Example
//!
//! ```
//! use bitactor_runtime::Matrix;
//!
//! let manifest = bitactor_aot::compile("noop_spec").unwrap();
//! let mut matrix = Matrix::new();
//! let domain = matrix.create_domain().unwrap();
//! matrix.add_actor(domain, 0x00, &manifest, None).unwrap();
//!
//! let executed = matrix.tick(&[]);
//! assert_eq!(executed, 1);
//! ```

pub mod actor;
pub mod cognitive;
pub mod dark;
pub mod domain;
pub mod entanglement;
pub mod error;
pub mod feed;
pub mod matrix;
pub mod metrics;
pub mod registry;
pub mod telemetry;

pub use actor::BitActor;
pub use cognitive::{execute_cognitive_cycle, Hop};
pub use dark::{DarkTriple, DarkTripleSystem};
pub use domain::Domain;
pub use entanglement::{
    ActorPool, EntanglementConnection, EntanglementOracle, EntanglementSignal,
};
pub use error::{Result, RuntimeError};
pub use feed::FeedActor;
pub use matrix::{Matrix, MatrixConfig};
pub use metrics::{DarkTripleMetrics, OracleMetrics, PerformanceCounters};
pub use registry::Registry;
pub use telemetry::{NullSink, RecordingSink, SpanEvent, TelemetrySink};
