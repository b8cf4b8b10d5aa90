use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"https?://\S+").expect("valid regex");
    static ref WWW_RE: Regex = Regex::new(r"www\.\S+").expect("valid regex");
    static ref MENTION_RE: Regex = Regex::new(r"@\w+").expect("valid regex");
    static ref HSPACE_RE: Regex = Regex::new(r"[ \t]+").expect("valid regex");
}

/// Strips link and mention noise from raw post text.
///
/// Applied in fixed order: scheme-prefixed URLs, bare `www.` URLs,
/// `@`-mentions, then runs of spaces and tabs collapse to a single space.
/// Newlines are preserved inside the text; leading and trailing whitespace
/// is trimmed. Idempotent for any input.
pub fn normalize(raw: &str) -> String {
    let text = URL_RE.replace_all(raw, "");
    let text = WWW_RE.replace_all(&text, "");
    let text = MENTION_RE.replace_all(&text, "");
    let text = HSPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}
