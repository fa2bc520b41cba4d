//! Error types for classfix-edit.
//!
//! Two families, matching the exit codes the CLI reports:
//! - Blocks (exit code 2): a file changed on disk between read and write
//! - Runtime errors (exit code 1): invalid edits, I/O failures

use classfix_types::Range;
use thiserror::Error;

/// The top-level error type for classfix-edit operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// The edit set cannot be applied to the text it was computed for.
    #[error("invalid edit: {0}")]
    Splice(#[from] SpliceError),

    /// The file on disk no longer matches what was read (exit code 2).
    #[error("precondition mismatch for {path}: expected sha256 {expected}, got {actual}")]
    PreconditionMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// A runtime/tool error occurred (exit code 1).
    #[error("runtime error: {0}")]
    Runtime(#[from] anyhow::Error),
}

/// Reasons an edit set is rejected before any byte is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    #[error("edit {range} is outside a document of {len} bytes")]
    OutOfBounds { range: Range, len: usize },

    #[error("edit boundary {offset} is not on a char boundary")]
    NotCharBoundary { offset: usize },

    #[error("edits {first} and {second} overlap")]
    Overlap { first: Range, second: Range },
}

impl EditError {
    /// Returns true if the write was refused because the file changed.
    pub fn is_block(&self) -> bool {
        matches!(self, EditError::PreconditionMismatch { .. })
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_block() { 2 } else { 1 }
    }
}

/// Result type alias using EditError.
pub type EditResult<T> = Result<T, EditError>;
