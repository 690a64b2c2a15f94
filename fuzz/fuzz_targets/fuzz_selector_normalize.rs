#![no_main]

//! Normalization of arbitrary text selectors: never panics, stays
//! idempotent, and preserves the segment/delimiter relationship.

use libfuzzer_sys::fuzz_target;
use provide_state_core::{Path, Selector};

fuzz_target!(|text: String| {
    let selector = Selector::from(text.as_str());
    let path = selector.normalize();

    // One more segment than delimiters, always.
    assert_eq!(path.len(), text.matches('.').count() + 1);

    // Idempotence: normalizing the canonical form is the identity.
    let again = Selector::from(path.clone()).normalize();
    assert_eq!(again, path);

    // Segment round-trip through the explicit-segments shape.
    let segments: Vec<String> = path.iter().map(str::to_owned).collect();
    assert_eq!(Selector::from(segments).normalize(), path);

    let _ = Path::from_segments(path.iter());
});
