use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref HASHTAG_RE: Regex = Regex::new(r"#\w+").expect("valid regex");
}

/// Extracts hashtag tokens from the original, pre-normalization text.
///
/// Tokens keep their leading `#`, appear in order of first appearance and
/// duplicates are retained. Purely descriptive metadata on the post; not
/// involved in deduplication.
pub fn extract(raw: &str) -> Vec<String> {
    HASHTAG_RE
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}
