use crate::locators::CandidateLocator;
use crate::regions::literal_ranges;
use classfix_grammar::{GrammarError, Grammars, Layer, capture};
use classfix_types::{Candidate, Origin, Region};

/// Class attributes in the markup between directives.
///
/// The markup grammar sees only the literal regions, so an attribute value
/// interrupted by `<%= %>` still parses as one node spanning the hole.
pub struct MarkupLocator;

impl CandidateLocator for MarkupLocator {
    fn origin(&self) -> Origin {
        Origin::Markup
    }

    fn locate(
        &self,
        grammars: &Grammars,
        text: &str,
        regions: &[Region],
    ) -> Result<Vec<Candidate>, GrammarError> {
        let included = literal_ranges(regions);
        if included.is_empty() || !grammars.has_markup_query() {
            return Ok(vec![]);
        }

        let captures = grammars.parse_captures(Layer::Markup, text, Some(&included))?;
        Ok(captures
            .into_iter()
            .filter(|c| c.name == capture::CLASS_VALUE)
            .map(|c| Candidate::markup(text.len(), c.range))
            .collect())
    }
}
