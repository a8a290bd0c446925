//! BitActor AOT Compiler
//!
//! This crate turns a declarative specification into the immutable
//! artifacts the runtime consumes: a [`Manifest`] carrying bytecode whose
//! hash equals the specification hash (the hash=execution law), and
//! [`NanoRegex`] matchers for feed-actor signal triage.
//!
//! # Architecture
//!
//! - [`compiler`] - specification → [`Manifest`] translation and the
//!   hash=execution enforcement point
//! - [`manifest`] - the immutable `{spec_hash, bytecode}` bundle shared by
//!   every actor instantiated from one specification
//! - [`opcode`] - table-driven classification of bytecode bytes for
//!   diagnostics and telemetry span identifiers
//! - [`nanoregex`] - fixed-capacity pattern matchers over 64-bit signal words
//!
//! # Hash=Execution
//!
//! A manifest is only ever produced by [`compile`], which re-hashes the
//! emitted bytecode and rejects the compilation outright if the hash does
//! not equal the specification hash. Tampering with compiled bytecode is
//! therefore detectable by [`Manifest::verify`] at any point after
//! compilation.
//!
//! # Example
//!
//! ```
//! use bitactor_aot::compile;
//!
//! let manifest = compile("noop_spec").unwrap();
//! assert!(manifest.verify());
//! ```

pub mod compiler;
pub mod error;
pub mod manifest;
pub mod nanoregex;
pub mod opcode;

pub use compiler::compile;
pub use error::{CompileError, Result};
pub use manifest::Manifest;
pub use nanoregex::NanoRegex;
pub use opcode::{Opcode, OpcodeClass, OPCODE_MEANING_MASK};
