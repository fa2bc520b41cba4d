use crate::locators::CandidateLocator;
use classfix_grammar::{Capture, GrammarError, Grammars, Layer, capture};
use classfix_types::{Candidate, Origin, Range, Region};

/// Class-list string literals inside directive code.
///
/// Each directive is parsed on its own. A recognized string yields one
/// candidate per literal segment: the segment widened by one byte on each
/// side (to reach the quotes or the interpolation edge) and clipped to the
/// string, so `#{...}` behaves like a directive hole in markup.
pub struct ScriptLocator;

impl CandidateLocator for ScriptLocator {
    fn origin(&self) -> Origin {
        Origin::Script
    }

    fn locate(
        &self,
        grammars: &Grammars,
        text: &str,
        regions: &[Region],
    ) -> Result<Vec<Candidate>, GrammarError> {
        let mut out = Vec::new();
        for region in regions.iter().filter(|r| r.is_directive()) {
            let code = region.text(text);
            let captures = grammars.parse_captures(Layer::Script, code, None)?;
            out.extend(
                class_segments(&captures)
                    .into_iter()
                    .map(|span| Candidate::script(region.range, span)),
            );
        }
        Ok(out)
    }
}

fn class_segments(captures: &[Capture]) -> Vec<Range> {
    let ranges_named = |name: &str| -> Vec<Range> {
        captures
            .iter()
            .filter(|c| c.name == name)
            .map(|c| c.range)
            .collect()
    };
    let mut values = ranges_named(capture::CLASS_VALUE);
    values.sort();
    values.dedup();
    let strings = ranges_named(capture::STRING);
    let contents = ranges_named(capture::STRING_CONTENT);

    let mut out = Vec::new();
    for value in &values {
        for content in contents.iter().filter(|c| value.contains_range(**c)) {
            // Segments of strings nested in an interpolation belong to those strings.
            let innermost = strings
                .iter()
                .filter(|s| s.contains_range(*content))
                .min_by_key(|s| s.len());
            if innermost.is_some_and(|s| s != value) {
                continue;
            }
            let widened = Range::new(content.start.saturating_sub(1), content.end + 1);
            if let Some(segment) = widened.intersect(*value) {
                out.push(segment);
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regions::split_regions;
    use classfix_types::ClassNames;
    use pretty_assertions::assert_eq;

    fn locate_with(names: &ClassNames, text: &str) -> Vec<String> {
        let grammars = Grammars::new(names).expect("grammars");
        let regions = split_regions(&grammars, text).expect("split");
        ScriptLocator
            .locate(&grammars, text, &regions)
            .expect("locate")
            .into_iter()
            .map(|c| text[c.document_span().as_std()].to_string())
            .collect()
    }

    fn locate(text: &str) -> Vec<String> {
        locate_with(&ClassNames::default(), text)
    }

    #[test]
    fn class_keyword_argument() {
        assert_eq!(
            locate(r#"<%= link_to "Home", root_path, class: "b a" %>"#),
            vec![r#""b a""#]
        );
    }

    #[test]
    fn configured_helper_argument() {
        let names = ClassNames {
            methods: vec!["helper".to_string()],
            ..ClassNames::default()
        };
        assert_eq!(
            locate_with(&names, r#"<% helper("z-10 flex") %>"#),
            vec![r#""z-10 flex""#]
        );
    }

    #[test]
    fn interpolation_splits_the_string() {
        assert_eq!(
            locate(r#"<%= tag.div class: "b a #{x} d c" %>"#),
            vec![r#""b a #"#.to_string(), r#"} d c""#.to_string()]
        );
    }

    #[test]
    fn strings_nested_in_interpolation_are_not_class_segments() {
        assert_eq!(
            locate(r#"<%= tag.p class: "b #{t("x y")} a" %>"#),
            vec![r#""b #"#.to_string(), r#"} a""#.to_string()]
        );
    }

    #[test]
    fn unrelated_strings_are_ignored() {
        assert!(locate(r#"<%= render "a b", locals: { title: "c d" } %>"#).is_empty());
    }

    #[test]
    fn empty_string_has_no_segment() {
        assert!(locate(r#"<%= tag.p class: "" %>"#).is_empty());
    }
}
