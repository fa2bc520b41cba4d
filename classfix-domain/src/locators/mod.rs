use classfix_grammar::{GrammarError, Grammars};
use classfix_types::{Candidate, Origin, Region};

mod markup;
mod script;

pub use markup::MarkupLocator;
pub use script::ScriptLocator;

/// Finds class-list candidates in the regions of one kind.
pub trait CandidateLocator: Send + Sync {
    fn origin(&self) -> Origin;

    fn locate(
        &self,
        grammars: &Grammars,
        text: &str,
        regions: &[Region],
    ) -> Result<Vec<Candidate>, GrammarError>;
}

/// Markup first, then script; matches the stage order of a run.
pub fn builtin_locators() -> Vec<Box<dyn CandidateLocator>> {
    vec![Box::new(MarkupLocator), Box::new(ScriptLocator)]
}
