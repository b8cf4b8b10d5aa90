use gleaner_core::{NormalizedPost, SortMode};
use std::cmp::Reverse;

/// Reorders the result set by normalized-text length (Unicode scalar
/// count). The sort is stable: posts of equal length keep their relative
/// discovery order, so identical inputs always produce identical output.
pub fn rank(results: &mut [NormalizedPost], mode: SortMode) {
    match mode {
        SortMode::None => {}
        SortMode::ShortestFirst => results.sort_by_key(|p| p.text.chars().count()),
        SortMode::LongestFirst => results.sort_by_key(|p| Reverse(p.text.chars().count())),
    }
}

/// Rewrites sequence numbers to match current order: position i gets
/// i + 1. Must run after `rank` so the numbers reflect presentation
/// order, not discovery order.
pub fn renumber(results: &mut [NormalizedPost]) {
    for (index, post) in results.iter_mut().enumerate() {
        post.sequence = index + 1;
    }
}
