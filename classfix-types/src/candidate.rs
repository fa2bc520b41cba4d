use crate::span::Range;
use serde::{Deserialize, Serialize};

/// Which locator found a class list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Markup,
    Script,
}

/// An unresolved, possibly over-wide class-list location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub origin: Origin,
    /// Region family the candidate belongs to, in document coordinates.
    /// The whole document for markup, the directive region for script.
    pub source_range: Range,
    /// Offset of the parsed buffer within the document.
    pub base: usize,
    /// Span relative to the parsed buffer.
    pub raw_span: Range,
}

impl Candidate {
    pub fn markup(document_len: usize, raw_span: Range) -> Self {
        Self {
            origin: Origin::Markup,
            source_range: Range::new(0, document_len),
            base: 0,
            raw_span,
        }
    }

    pub fn script(region: Range, raw_span: Range) -> Self {
        Self {
            origin: Origin::Script,
            source_range: region,
            base: region.start,
            raw_span,
        }
    }

    pub fn document_span(&self) -> Range {
        self.raw_span.shift(self.base)
    }
}

/// Exact class-list text ready for canonicalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSpan {
    pub origin: Origin,
    pub document_range: Range,
    pub text: String,
}

/// Replacement of one document range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub range: Range,
    pub replacement: String,
}

impl Edit {
    pub fn new(range: Range, replacement: impl Into<String>) -> Self {
        Self {
            range,
            replacement: replacement.into(),
        }
    }
}
