#![no_main]

//! Fuzz target for locate -> rewrite over arbitrary templates.
//!
//! Whatever the input, located spans must be in bounds, on char boundaries
//! and disjoint, and splicing a reversed copy of every span must succeed.

use classfix_domain::Locator;
use classfix_edit::apply_edits;
use classfix_grammar::Grammars;
use classfix_types::{ClassNames, Edit};
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};

fn locator() -> &'static Locator {
    static LOCATOR: OnceLock<Locator> = OnceLock::new();
    LOCATOR.get_or_init(|| {
        let grammars = Grammars::new(&ClassNames::default()).expect("grammars");
        Locator::new(Arc::new(grammars))
    })
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else { return };
    let Ok(located) = locator().locate(text) else { return };

    for pair in located.spans.windows(2) {
        assert!(pair[0].document_range.end <= pair[1].document_range.start);
    }

    let edits: Vec<Edit> = located
        .spans
        .iter()
        .map(|span| {
            assert!(text.get(span.document_range.as_std()).is_some());
            let reversed: Vec<&str> = span.text.split_whitespace().rev().collect();
            Edit::new(span.document_range, reversed.join(" "))
        })
        .collect();

    let out = apply_edits(text, &edits).expect("located spans always splice");
    if edits.is_empty() {
        assert_eq!(out, text);
    }
});
