#![no_main]

//! Joining arbitrary selector lists: associativity and length additivity.

use libfuzzer_sys::fuzz_target;
use provide_state_core::{Selector, join_selectors};

fuzz_target!(|parts: Vec<Vec<String>>| {
    let selectors: Vec<Selector> = parts.into_iter().map(Selector::from).collect();

    // Total length is the sum of the parts.
    let joined = join_selectors(selectors.iter().cloned());
    let expected: usize = selectors.iter().map(|s| s.normalize().len()).sum();
    assert_eq!(joined.len(), expected);

    // Associativity against pairwise folding.
    let folded = selectors
        .iter()
        .fold(provide_state_core::Path::new(), |acc, selector| {
            acc.join(&selector.normalize())
        });
    assert_eq!(joined, folded);
});
