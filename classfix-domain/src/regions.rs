use classfix_grammar::{GrammarError, Grammars, Layer, capture};
use classfix_types::{Range, Region};
use tracing::debug;

/// Splits a template into literal and directive regions, in document order.
///
/// Delimiters and comment directives are left out, so they can never be
/// touched by a later edit.
pub fn split_regions(grammars: &Grammars, text: &str) -> Result<Vec<Region>, GrammarError> {
    let captures = grammars.parse_captures(Layer::Directive, text, None)?;

    let mut regions: Vec<Region> = captures
        .into_iter()
        .filter(|c| !c.range.is_empty())
        .filter_map(|c| match c.name.as_str() {
            capture::LITERAL => Some(Region::literal(c.range)),
            capture::DIRECTIVE => Some(Region::directive(c.range)),
            _ => None,
        })
        .collect();
    regions.sort_by_key(|r| (r.range.start, r.range.end));
    regions.dedup();

    debug!(
        literal = regions.iter().filter(|r| r.is_literal()).count(),
        directive = regions.iter().filter(|r| r.is_directive()).count(),
        "split regions"
    );
    Ok(regions)
}

/// Ranges of the literal regions, ordered and disjoint.
pub fn literal_ranges(regions: &[Region]) -> Vec<Range> {
    regions
        .iter()
        .filter(|r| r.is_literal())
        .map(|r| r.range)
        .collect()
}
