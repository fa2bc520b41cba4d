//! Narrowing of candidates to the exact class text.
//!
//! A candidate's raw span is the attribute value or string literal as the
//! grammar sees it: quotes included, and for markup possibly stretching over
//! directive holes. Each contiguous stretch inside one region is narrowed by
//! the boundary scan: the text between the first and the last `"` or
//! whitespace character. That drops the quotes and any class fragment glued to
//! a hole (`px-<%= n %>`), while inner whitespace is kept for the
//! canonicalizer to normalize.

use classfix_types::{Candidate, Origin, Range, Region, ResolvedSpan};
use tracing::trace;

/// Resolves candidates against the regions they were found in.
///
/// Output is sorted by start and free of duplicates. Every span lies inside
/// exactly one region: markup spans inside a literal region, script spans
/// inside the directive region of their candidate.
pub fn reconcile(text: &str, regions: &[Region], candidates: &[Candidate]) -> Vec<ResolvedSpan> {
    let mut out = Vec::new();
    for candidate in candidates {
        let span = candidate.document_span();
        let pieces: Vec<Range> = match candidate.origin {
            Origin::Markup => regions
                .iter()
                .filter(|r| r.is_literal())
                .filter_map(|r| span.intersect(r.range))
                .collect(),
            Origin::Script => span.intersect(candidate.source_range).into_iter().collect(),
        };

        for piece in pieces {
            match narrow(text, piece) {
                Some(range) => out.push(ResolvedSpan {
                    origin: candidate.origin,
                    document_range: range,
                    text: text[range.as_std()].to_string(),
                }),
                None => trace!(%piece, "discarded degenerate span"),
            }
        }
    }

    out.sort_by_key(|s| (s.document_range.start, s.document_range.end));
    out.dedup_by(|a, b| a.document_range == b.document_range);
    out
}

/// Boundary scan of one stretch of text.
///
/// Returns `None` when the stretch has no boundary character, when the
/// narrowed range is empty or inverted, or when it holds only whitespace.
pub fn narrow(text: &str, piece: Range) -> Option<Range> {
    let slice = text.get(piece.as_std())?;
    let mut boundaries = slice
        .char_indices()
        .filter(|(_, ch)| *ch == '"' || ch.is_whitespace());

    let (first, first_ch) = boundaries.next()?;
    let last = boundaries.last().map_or(first, |(i, _)| i);

    let start = piece.start + first + first_ch.len_utf8();
    let end = piece.start + last;
    if end <= start {
        return None;
    }
    let range = Range::new(start, end);
    if text[range.as_std()].trim().is_empty() {
        return None;
    }
    Some(range)
}
