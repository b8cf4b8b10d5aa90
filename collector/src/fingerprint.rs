use sha1::{Digest, Sha1};
use std::fmt;

/// Deduplication key derived from normalized post text.
///
/// A pure function of the text, stable across runs and processes. Two
/// posts that normalize to the same string always collide, regardless of
/// which query surfaced them; a hash collision between different texts is
/// accepted as a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 20]);

pub fn fingerprint(normalized_text: &str) -> Fingerprint {
    let mut hasher = Sha1::new();
    hasher.update(normalized_text.as_bytes());
    Fingerprint(hasher.finalize().into())
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        assert_eq!(fingerprint("Hello world"), fingerprint("Hello world"));
    }

    #[test]
    fn test_distinct_texts_differ() {
        assert_ne!(fingerprint("Hello world"), fingerprint("Hello worlds"));
        assert_ne!(fingerprint(""), fingerprint(" "));
    }

    #[test]
    fn test_display_is_hex() {
        let rendered = fingerprint("Hello world").to_string();
        assert_eq!(rendered.len(), 40);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
