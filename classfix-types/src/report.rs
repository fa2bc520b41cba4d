use crate::candidate::Origin;
use crate::span::{Position, Range};
use serde::{Deserialize, Serialize};

/// Outcome of one document, as reported by `--check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentReport {
    pub schema: String,

    /// File path, or `<stdin>`.
    pub source: String,

    pub changed: bool,

    /// Class lists found in the document.
    pub spans_total: u64,

    /// Spans whose canonical form differs from the original.
    #[serde(default)]
    pub spans: Vec<SpanReport>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            schema: crate::schema::CLASSFIX_CHECK_V1.to_string(),
            source: source.into(),
            changed: false,
            spans_total: 0,
            spans: vec![],
            error: None,
        }
    }
}

/// A class list that is not in canonical order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanReport {
    pub origin: Origin,
    pub range: Range,
    pub position: Position,
    pub before: String,
    pub after: String,
}
