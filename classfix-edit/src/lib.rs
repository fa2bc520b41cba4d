//! Edit engine for classfix.
//!
//! Responsibilities:
//! - Splice a set of replacements into a document in one pass.
//! - Generate a unified diff preview.
//! - Write a document back only if it is unchanged since it was read.

mod error;

pub use error::{EditError, EditResult, SpliceError};

use anyhow::Context;
use camino::Utf8Path;
use classfix_types::Edit;
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Apply `edits` to `text`.
///
/// Edits may arrive in any order. Their ranges refer to the original text, so
/// the result is the same as splicing them back to front one at a time. Edits
/// whose replacement equals the text they cover are dropped, so an unchanged
/// document comes back byte-identical.
pub fn apply_edits(text: &str, edits: &[Edit]) -> Result<String, SpliceError> {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by_key(|e| (e.range.start, e.range.end));

    let mut prev: Option<&Edit> = None;
    for edit in &sorted {
        if edit.range.end > text.len() {
            return Err(SpliceError::OutOfBounds {
                range: edit.range,
                len: text.len(),
            });
        }
        for offset in [edit.range.start, edit.range.end] {
            if !text.is_char_boundary(offset) {
                return Err(SpliceError::NotCharBoundary { offset });
            }
        }
        if let Some(p) = prev {
            if p.range.end > edit.range.start {
                return Err(SpliceError::Overlap {
                    first: p.range,
                    second: edit.range,
                });
            }
        }
        prev = Some(edit);
    }

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    let mut applied = 0usize;
    for edit in sorted {
        let original = &text[edit.range.as_std()];
        if original == edit.replacement {
            continue;
        }
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
        applied += 1;
    }
    out.push_str(&text[cursor..]);
    debug!(edits = edits.len(), applied, "spliced");
    Ok(out)
}

/// Unified diff of one document, or an empty string when nothing changed.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    let formatter = PatchFormatter::new();
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy repeats the ---/+++ header; keep only the hunks.
    let hunks = body.find("@@").map_or(body.as_str(), |i| &body[i..]);
    out.push_str(hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Options for [`write_if_unchanged`].
#[derive(Debug, Clone, Default)]
pub struct WriteOptions {
    /// When set, the previous contents are copied to `<path><suffix>` first.
    pub backup_suffix: Option<String>,
}

/// Replace the contents of `path` if its sha256 still equals `expected_sha256`.
///
/// Returns the backup path when one was written.
pub fn write_if_unchanged(
    path: &Utf8Path,
    expected_sha256: &str,
    contents: &str,
    opts: &WriteOptions,
) -> EditResult<Option<String>> {
    let current = fs::read(path).with_context(|| format!("read {}", path))?;
    let actual = sha256_hex(&current);
    if actual != expected_sha256 {
        return Err(EditError::PreconditionMismatch {
            path: path.to_string(),
            expected: expected_sha256.to_string(),
            actual,
        });
    }

    let backup = match &opts.backup_suffix {
        Some(suffix) => {
            let backup = format!("{path}{suffix}");
            fs::write(&backup, &current).with_context(|| format!("write {}", backup))?;
            Some(backup)
        }
        None => None,
    };

    fs::write(path, contents).with_context(|| format!("write {}", path))?;
    debug!(%path, bytes = contents.len(), backup = backup.is_some(), "wrote document");
    Ok(backup)
}
