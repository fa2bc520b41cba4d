use crate::span::Range;
use serde::{Deserialize, Serialize};

/// What a stretch of template text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Plain markup between directives.
    Literal,
    /// Script code inside a directive's delimiters.
    Directive,
}

/// One region of a template document, produced by the region splitter.
///
/// Regions of a document are disjoint and ordered. Delimiters such as `<%=`
/// and `%>`, and comment directives, fall in the gaps between regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    pub range: Range,
}

impl Region {
    pub fn literal(range: Range) -> Self {
        Self {
            kind: RegionKind::Literal,
            range,
        }
    }

    pub fn directive(range: Range) -> Self {
        Self {
            kind: RegionKind::Directive,
            range,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, RegionKind::Literal)
    }

    pub fn is_directive(&self) -> bool {
        matches!(self.kind, RegionKind::Directive)
    }

    pub fn text<'a>(&self, document: &'a str) -> &'a str {
        &document[self.range.as_std()]
    }
}
