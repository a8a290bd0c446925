//! BitActor Learning Layer (L9).
//!
//! This crate extends the base runtime with adaptive behavior while
//! preserving the trinity contract: the learning hot path is O(1), reads
//! only precompiled pattern logic, and disables itself the moment it
//! pushes an actor over the cycle budget. All pattern compilation,
//! discovery, adaptation, and sharing happens in the slow path.
//!
//! # Architecture
//!
//! - [`pattern`] - compiled learning patterns and the discovery detector
//! - [`actor`] - [`LearningActor`]: a BitActor plus the learning extension
//! - [`cognitive`] - extension hops 8-10 over the base cognitive cycle
//! - [`matrix`] - [`LearningMatrix`]: tick scheduling for learning pools
//!
//! # Example
//!
//! ```
//! use bitactor_learning::{LearningMatrix, LearningMode};
//!
//! let manifest = bitactor_aot::compile("adaptive_spec").unwrap();
//! let mut matrix = LearningMatrix::new();
//! let slot = matrix.add_ls_actor(0x00, &manifest).unwrap();
//! matrix.add_pattern(slot, &[0x01, 0x02, 0x03, 0x04], 0.8).unwrap();
//! matrix.set_learning_mode(slot, LearningMode::Adapt).unwrap();
//!
//! matrix.tick(&[]);
//! ```

pub mod actor;
pub mod cognitive;
pub mod matrix;
pub mod pattern;

pub use actor::{LearningActor, LearningMode};
pub use cognitive::{execute_extended_cycle, ExtendedHop, LearningMetrics};
pub use matrix::LearningMatrix;
pub use pattern::{discover, Discovered, LearningPattern};
