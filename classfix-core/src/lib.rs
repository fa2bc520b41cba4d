//! Embeddable core library for classfix.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking
//! into editors, build tools or other host processes.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`Canonicalizer`](ports::Canonicalizer): reorder one class list
//! - [`DocumentSource`](ports::DocumentSource): read templates
//! - [`WritePort`](ports::WritePort): write templates back, guarded by sha256
//!
//! The [`adapters`] module provides filesystem, in-memory and process-backed
//! implementations.
//!
//! # Entry points
//!
//! - [`Engine::run_document`](pipeline::Engine::run_document): one document, in memory
//! - [`Engine::run_batch`](pipeline::Engine::run_batch): many documents through the ports

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod settings;

pub use pipeline::{BatchEntry, DocumentError, DocumentOutcome, Engine, Source, engine_from_settings};
pub use settings::{CanonicalizerKind, CanonicalizerSettings, RunMode, RunSettings};

// Re-export so embedders don't need classfix-types directly.
pub use classfix_types::{ClassNames, DocumentReport, Stage};
