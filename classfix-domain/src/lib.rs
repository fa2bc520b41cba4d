//! Domain logic: find the class lists of a template, byte-exactly.
//!
//! This crate owns *where* class lists are. It does not own *how* they are
//! reordered (`classfix-core` canonicalizers) or spliced (`classfix-edit`).

mod locators;
mod reconcile;
mod regions;

pub use locators::{CandidateLocator, MarkupLocator, ScriptLocator, builtin_locators};
pub use reconcile::{narrow, reconcile};
pub use regions::{literal_ranges, split_regions};

use classfix_grammar::{GrammarError, Grammars};
use classfix_types::{Candidate, Region, ResolvedSpan, Stage};
use std::sync::Arc;
use tracing::debug;

/// A grammar failure and the stage it ended.
#[derive(Debug, thiserror::Error)]
#[error("{stage}: {source}")]
pub struct LocateError {
    pub stage: Stage,
    #[source]
    pub source: GrammarError,
}

/// Everything found in one document.
#[derive(Debug, Clone, Default)]
pub struct Located {
    pub regions: Vec<Region>,
    pub candidates: Vec<Candidate>,
    pub spans: Vec<ResolvedSpan>,
}

/// Runs splitting, both locators and reconciliation on one document.
pub struct Locator {
    grammars: Arc<Grammars>,
    locators: Vec<Box<dyn CandidateLocator>>,
}

impl Locator {
    pub fn new(grammars: Arc<Grammars>) -> Self {
        Self {
            grammars,
            locators: builtin_locators(),
        }
    }

    pub fn with_locators(grammars: Arc<Grammars>, locators: Vec<Box<dyn CandidateLocator>>) -> Self {
        Self { grammars, locators }
    }

    pub fn locate(&self, text: &str) -> Result<Located, LocateError> {
        let regions = split_regions(&self.grammars, text).map_err(|source| LocateError {
            stage: Stage::Splitting,
            source,
        })?;

        let mut candidates = Vec::new();
        for locator in &self.locators {
            let stage = Stage::Locating(locator.origin());
            let mut found = locator
                .locate(&self.grammars, text, &regions)
                .map_err(|source| LocateError { stage, source })?;
            debug!(%stage, candidates = found.len(), "located");
            candidates.append(&mut found);
        }

        let spans = reconcile(text, &regions, &candidates);
        debug!(stage = %Stage::Reconciling, spans = spans.len(), "reconciled");

        Ok(Located {
            regions,
            candidates,
            spans,
        })
    }
}
