//! Shared types for the classfix workspace.
//!
//! # Design constraints
//! - Every offset is a byte offset into the original, unmutated document.
//! - Region, candidate and span values live for one document run only.
//! - Report types are serialized for `--check --format json`; prefer adding
//!   optional fields over changing semantics.

pub mod candidate;
pub mod classes;
pub mod region;
pub mod report;
pub mod span;
pub mod stage;

pub use candidate::{Candidate, Edit, Origin, ResolvedSpan};
pub use classes::ClassNames;
pub use region::{Region, RegionKind};
pub use report::{DocumentReport, SpanReport};
pub use span::{LineIndex, Position, Range};
pub use stage::Stage;

/// Schema identifiers.
pub mod schema {
    pub const CLASSFIX_CHECK_V1: &str = "classfix.check.v1";
}
