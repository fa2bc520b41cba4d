//! Scenario tests for the locate pass over whole templates.

use classfix_domain::Locator;
use classfix_grammar::Grammars;
use classfix_types::{ClassNames, Origin};
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn locator_with(names: ClassNames) -> Locator {
    Locator::new(Arc::new(Grammars::new(&names).expect("grammars")))
}

fn span_texts(locator: &Locator, text: &str) -> Vec<(Origin, String)> {
    locator
        .locate(text)
        .expect("locate")
        .spans
        .into_iter()
        .map(|s| (s.origin, s.text))
        .collect()
}

#[test]
fn interrupted_attribute_yields_both_sides_of_the_directive() {
    let locator = locator_with(ClassNames::default());
    let text = r#"<div class="a <%= b %> c">x</div>"#;
    assert_eq!(
        span_texts(&locator, text),
        vec![
            (Origin::Markup, "a".to_string()),
            (Origin::Markup, "c".to_string()),
        ]
    );
}

#[test]
fn class_string_inside_directive_call() {
    let locator = locator_with(ClassNames {
        methods: vec!["helper".to_string()],
        ..ClassNames::default()
    });
    let text = r#"<% helper("z-10 flex") %>"#;
    let located = locator.locate(text).expect("locate");
    assert_eq!(located.spans.len(), 1);
    let span = &located.spans[0];
    assert_eq!(span.origin, Origin::Script);
    assert_eq!(span.text, "z-10 flex");
    assert_eq!(span.document_range.start, text.find("z-10").expect("start"));
}

#[test]
fn value_made_only_of_a_directive_has_no_markup_span() {
    let locator = locator_with(ClassNames::default());
    let text = r#"<div class="<%= classes %>">x</div>"#;
    assert!(span_texts(&locator, text).is_empty());
}

#[test]
fn whitespace_only_value_is_degenerate() {
    let locator = locator_with(ClassNames::default());
    assert!(span_texts(&locator, r#"<div class=" ">x</div>"#).is_empty());
}

#[test]
fn markup_and_script_spans_come_back_in_document_order() {
    let locator = locator_with(ClassNames::default());
    let text = concat!(
        "<nav class=\"b a\">\n",
        "  <%= link_to \"Home\", root_path, class: \"d c\" %>\n",
        "  <p class=\"f <%= x %> e\">y</p>\n",
        "</nav>\n",
    );
    assert_eq!(
        span_texts(&locator, text),
        vec![
            (Origin::Markup, "b a".to_string()),
            (Origin::Script, "d c".to_string()),
            (Origin::Markup, "f".to_string()),
            (Origin::Markup, "e".to_string()),
        ]
    );
}

#[test]
fn glued_fragment_next_to_a_hole_is_left_alone() {
    let locator = locator_with(ClassNames::default());
    let text = r#"<div class="flex px-<%= n %> grid">x</div>"#;
    assert_eq!(
        span_texts(&locator, text),
        vec![
            (Origin::Markup, "flex".to_string()),
            (Origin::Markup, "grid".to_string()),
        ]
    );
}
