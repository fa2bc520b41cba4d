//! Property-based tests for the whole pipeline.
//!
//! These tests verify key invariants:
//! - Idempotence: running over an output changes nothing
//! - Locality: only bytes inside resolved spans change

use classfix_core::adapters::AlphabeticalCanonicalizer;
use classfix_core::{Engine, RunSettings, Source};
use proptest::prelude::*;
use std::sync::Arc;

fn arb_classes() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::string::string_regex(r"[a-z][a-z0-9-]{0,4}").unwrap(),
        0..5,
    )
    .prop_map(|tokens| tokens.join(" "))
}

fn arb_template() -> impl Strategy<Value = String> {
    let piece = (0usize..5, arb_classes(), arb_classes()).prop_map(|(kind, a, b)| match kind {
        0 => format!("<div class=\"{a}\">\n"),
        1 => format!("<p class=\"{a} <%= x %> {b}\">t</p>\n"),
        2 => format!("<%= link_to \"t\", u, class: \"{a}\" %>\n"),
        3 => format!("<%= tag.div class: \"{a} #{{y}} {b}\" %>\n"),
        _ => "</div>\n".to_string(),
    });
    prop::collection::vec(piece, 0..6).prop_map(|pieces| pieces.concat())
}

fn run(engine: &Engine, text: String) -> classfix_core::DocumentOutcome {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    rt.block_on(engine.run_document(Source::Stdin, text))
        .expect("run")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn second_run_is_a_no_op(text in arb_template()) {
        let engine = Engine::new(&RunSettings::default(), Arc::new(AlphabeticalCanonicalizer))
            .expect("engine");
        let first = run(&engine, text);
        let second = run(&engine, first.output.clone());
        prop_assert_eq!(&second.output, &first.output);
        prop_assert!(!second.changed());
    }

    #[test]
    fn unchanged_spans_mean_unchanged_document(text in arb_template()) {
        let engine = Engine::new(&RunSettings::default(), Arc::new(AlphabeticalCanonicalizer))
            .expect("engine");
        let outcome = run(&engine, text);
        if outcome.changed_spans().count() == 0 {
            prop_assert_eq!(&outcome.output, &outcome.original);
        }
    }
}
