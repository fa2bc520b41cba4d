//! Port traits abstracting all I/O away from the pipeline.

use async_trait::async_trait;
use camino::Utf8Path;
use classfix_edit::EditResult;

use crate::pipeline::Source;

/// Reorders one class list into canonical form.
///
/// Implementations must be deterministic and idempotent: canonicalizing a
/// canonical list returns it unchanged.
#[async_trait]
pub trait Canonicalizer: Send + Sync {
    async fn canonicalize(&self, classes: &str) -> anyhow::Result<String>;
}

/// Source of template text.
pub trait DocumentSource: Send + Sync {
    fn read(&self, source: &Source) -> anyhow::Result<String>;
}

/// Template write-back.
pub trait WritePort: Send + Sync {
    /// Replace `path` with `contents` if its sha256 is still `expected_sha256`.
    /// Returns the backup path when one was written.
    fn write_document(
        &self,
        path: &Utf8Path,
        expected_sha256: &str,
        contents: &str,
    ) -> EditResult<Option<String>>;
}
