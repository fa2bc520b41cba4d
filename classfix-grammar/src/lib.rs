//! Grammar registry for classfix.
//!
//! Three tree-sitter grammars cover the three syntax layers of an ERB
//! template: `embedded_template` for directives, `html` for markup and `ruby`
//! for directive code. Queries are compiled once in [`Grammars::new`] and
//! shared read-only; every parse creates its own `Parser`, so a `Grammars`
//! value can serve many documents on many threads.

mod error;
mod queries;

pub use error::GrammarError;
pub use queries::{QuerySources, capture};

use classfix_types::{ClassNames, LineIndex, Range};
use std::fmt;
use streaming_iterator::StreamingIterator;
use tracing::debug;
use tree_sitter::{Language, Parser, Point, Query, QueryCursor, Tree};

/// Syntax layer of a hybrid template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Directive,
    Markup,
    Script,
}

impl Layer {
    pub fn language(self) -> Language {
        match self {
            Layer::Directive => tree_sitter_embedded_template::LANGUAGE.into(),
            Layer::Markup => tree_sitter_html::LANGUAGE.into(),
            Layer::Script => tree_sitter_ruby::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layer::Directive => f.write_str("directive"),
            Layer::Markup => f.write_str("markup"),
            Layer::Script => f.write_str("script"),
        }
    }
}

/// A named node captured by a query, in the coordinates of the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub name: String,
    pub range: Range,
}

/// Compiled queries for all three layers.
#[derive(Debug)]
pub struct Grammars {
    directive: Query,
    markup: Option<Query>,
    script: Query,
}

impl Grammars {
    pub fn new(names: &ClassNames) -> Result<Self, GrammarError> {
        let sources = QuerySources::render(names);
        let markup = match &sources.markup {
            Some(src) => Some(compile(Layer::Markup, src)?),
            None => None,
        };
        Ok(Self {
            directive: compile(Layer::Directive, &sources.directive)?,
            markup,
            script: compile(Layer::Script, &sources.script)?,
        })
    }

    /// True when a markup query is configured.
    pub fn has_markup_query(&self) -> bool {
        self.markup.is_some()
    }

    /// Parses `text` with the grammar of `layer`.
    ///
    /// With `included`, bytes outside those ranges are invisible to the parser
    /// while node offsets stay relative to `text`. The ranges must be ordered
    /// and disjoint. An empty slice means "no restriction" to tree-sitter, so
    /// callers skip the parse instead of passing one.
    pub fn parse(
        &self,
        layer: Layer,
        text: &str,
        included: Option<&[Range]>,
    ) -> Result<Tree, GrammarError> {
        let mut parser = Parser::new();
        parser
            .set_language(&layer.language())
            .map_err(|source| GrammarError::Language { layer, source })?;

        if let Some(ranges) = included {
            let index = LineIndex::new(text);
            let ts_ranges: Vec<tree_sitter::Range> = ranges
                .iter()
                .map(|r| tree_sitter::Range {
                    start_byte: r.start,
                    end_byte: r.end,
                    start_point: point(&index, r.start),
                    end_point: point(&index, r.end),
                })
                .collect();
            parser
                .set_included_ranges(&ts_ranges)
                .map_err(|source| GrammarError::IncludedRanges { layer, source })?;
        }

        let tree = parser
            .parse(text, None)
            .ok_or(GrammarError::Parse { layer })?;
        if tree.root_node().has_error() {
            debug!(%layer, "tree contains syntax errors");
        }
        Ok(tree)
    }

    /// Runs the query of `layer` against `tree`, returning captures in
    /// document order. Captures whose name starts with `_` only feed
    /// predicates and are dropped.
    pub fn captures(&self, layer: Layer, tree: &Tree, text: &str) -> Vec<Capture> {
        let query = match layer {
            Layer::Directive => &self.directive,
            Layer::Markup => match &self.markup {
                Some(q) => q,
                None => return Vec::new(),
            },
            Layer::Script => &self.script,
        };
        let names = query.capture_names();

        let mut out = Vec::new();
        let mut cursor = QueryCursor::new();
        let mut captures = cursor.captures(query, tree.root_node(), text.as_bytes());
        while let Some((qmatch, index)) = captures.next() {
            let capture = qmatch.captures[*index];
            let name = names[capture.index as usize];
            if name.starts_with('_') {
                continue;
            }
            out.push(Capture {
                name: name.to_string(),
                range: Range::new(capture.node.start_byte(), capture.node.end_byte()),
            });
        }
        out
    }

    /// Parses and queries in one step.
    pub fn parse_captures(
        &self,
        layer: Layer,
        text: &str,
        included: Option<&[Range]>,
    ) -> Result<Vec<Capture>, GrammarError> {
        let tree = self.parse(layer, text, included)?;
        Ok(self.captures(layer, &tree, text))
    }
}

fn compile(layer: Layer, source: &str) -> Result<Query, GrammarError> {
    Query::new(&layer.language(), source).map_err(|source| GrammarError::Query { layer, source })
}

fn point(index: &LineIndex, offset: usize) -> Point {
    let pos = index.position(offset);
    Point {
        row: pos.line,
        column: pos.column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grammars() -> Grammars {
        Grammars::new(&ClassNames::default()).expect("default queries compile")
    }

    fn named<'a>(caps: &'a [Capture], name: &str, text: &'a str) -> Vec<&'a str> {
        caps.iter()
            .filter(|c| c.name == name)
            .map(|c| &text[c.range.as_std()])
            .collect()
    }

    #[test]
    fn directive_query_tags_content_and_code() {
        let text = r#"<p class="a"><%= link_to "x" %></p><%# note %>"#;
        let caps = grammars()
            .parse_captures(Layer::Directive, text, None)
            .expect("parse");
        assert_eq!(named(&caps, capture::LITERAL, text), vec![r#"<p class="a">"#, "</p>"]);
        assert_eq!(named(&caps, capture::DIRECTIVE, text), vec![r#" link_to "x" "#]);
    }

    #[test]
    fn markup_query_captures_quoted_class_value() {
        let text = r#"<div id="x" class="b a">y</div>"#;
        let caps = grammars()
            .parse_captures(Layer::Markup, text, None)
            .expect("parse");
        assert_eq!(named(&caps, capture::CLASS_VALUE, text), vec![r#""b a""#]);
    }

    #[test]
    fn markup_parse_skips_excluded_ranges() {
        let text = r#"<div class="a <%= b %> c">x</div>"#;
        let hole = text.find("<%=").expect("hole");
        let end = text.find("%>").expect("end") + 2;
        let included = [Range::new(0, hole), Range::new(end, text.len())];
        let caps = grammars()
            .parse_captures(Layer::Markup, text, Some(&included))
            .expect("parse");
        assert_eq!(
            named(&caps, capture::CLASS_VALUE, text),
            vec![r#""a <%= b %> c""#]
        );
    }

    #[test]
    fn script_query_finds_class_keyword_and_call_argument() {
        let text = r#"link_to "Home", root_path, class: "b a"; token_list("d c")"#;
        let caps = grammars()
            .parse_captures(Layer::Script, text, None)
            .expect("parse");
        assert_eq!(
            named(&caps, capture::CLASS_VALUE, text),
            vec![r#""b a""#, r#""d c""#]
        );
    }

    #[test]
    fn script_query_ignores_unrelated_strings() {
        let text = r#"render "shared/header", title: "b a""#;
        let caps = grammars()
            .parse_captures(Layer::Script, text, None)
            .expect("parse");
        assert!(named(&caps, capture::CLASS_VALUE, text).is_empty());
    }

    #[test]
    fn unsorted_included_ranges_are_rejected() {
        let text = "<p>a</p><p>b</p>";
        let included = [Range::new(8, 16), Range::new(0, 8)];
        let err = grammars()
            .parse(Layer::Markup, text, Some(&included))
            .expect_err("overlapping order");
        assert_eq!(err.layer(), Layer::Markup);
    }

    #[test]
    fn no_markup_query_yields_no_captures() {
        let g = Grammars::new(&ClassNames {
            attributes: vec![],
            ..ClassNames::default()
        })
        .expect("compile");
        assert!(!g.has_markup_query());
        let caps = g
            .parse_captures(Layer::Markup, r#"<p class="a b">x</p>"#, None)
            .expect("parse");
        assert!(caps.is_empty());
    }
}
