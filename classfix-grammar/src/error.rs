//! Error types for classfix-grammar.

use crate::Layer;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GrammarError {
    /// The compiled grammar is incompatible with the linked tree-sitter runtime.
    #[error("load {layer} grammar: {source}")]
    Language {
        layer: Layer,
        #[source]
        source: tree_sitter::LanguageError,
    },

    /// A rendered query does not compile against its grammar.
    #[error("compile {layer} query: {source}")]
    Query {
        layer: Layer,
        #[source]
        source: tree_sitter::QueryError,
    },

    /// The range restriction was not ordered and disjoint.
    #[error("{layer} parser rejected included ranges: {source}")]
    IncludedRanges {
        layer: Layer,
        #[source]
        source: tree_sitter::IncludedRangesError,
    },

    /// The parser produced no tree.
    #[error("{layer} parser produced no tree")]
    Parse { layer: Layer },
}

impl GrammarError {
    pub fn layer(&self) -> Layer {
        match self {
            GrammarError::Language { layer, .. }
            | GrammarError::Query { layer, .. }
            | GrammarError::IncludedRanges { layer, .. }
            | GrammarError::Parse { layer } => *layer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_failure_names_the_layer() {
        let err = GrammarError::Parse {
            layer: Layer::Script,
        };
        assert_eq!(err.layer(), Layer::Script);
        assert_eq!(err.to_string(), "script parser produced no tree");
    }
}
