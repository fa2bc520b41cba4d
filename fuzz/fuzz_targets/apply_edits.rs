#![no_main]

//! Fuzz target for the splice engine with arbitrary, possibly invalid edits.

use classfix_edit::apply_edits;
use classfix_types::{Edit, Range};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, arbitrary::Arbitrary)]
struct SpliceInput {
    text: String,
    edits: Vec<(u16, u16, String)>,
}

fuzz_target!(|input: SpliceInput| {
    let edits: Vec<Edit> = input
        .edits
        .into_iter()
        .map(|(a, b, replacement)| {
            let (start, end) = if a <= b { (a, b) } else { (b, a) };
            Edit::new(Range::new(start as usize, end as usize), replacement)
        })
        .collect();

    // Invalid edit sets must be rejected, never panic.
    if let Ok(out) = apply_edits(&input.text, &edits) {
        let removed: usize = edits.iter().map(|e| e.range.len()).sum();
        let added: usize = edits.iter().map(|e| e.replacement.len()).sum();
        assert_eq!(out.len() + removed, input.text.len() + added);
    }
});
