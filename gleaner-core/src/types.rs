use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Unprocessed post as returned by the feed client.
#[derive(Debug, Clone)]
pub struct RawPost {
    pub id: String,
    pub text: String,
    pub author: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Cleaned post plus extracted tags and final sequence number.
///
/// `sequence` is rewritten after ranking so that the values form a
/// contiguous 1..N run in presentation order. `tags` come from the
/// original text, first-appearance order, duplicates kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedPost {
    pub sequence: usize,
    pub text: String,
    pub tags: Vec<String>,
}

/// Which search product the feed is asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Latest,
    Top,
}

impl SearchMode {
    /// Value of the `product` parameter the search endpoint expects.
    pub fn as_product(&self) -> &'static str {
        match self {
            SearchMode::Latest => "Latest",
            SearchMode::Top => "Top",
        }
    }
}

impl FromStr for SearchMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "latest" => Ok(SearchMode::Latest),
            "top" => Ok(SearchMode::Top),
            _ => Err(ConfigError::InvalidValue {
                field: "search_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Optional reordering of the final result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    None,
    ShortestFirst,
    LongestFirst,
}

impl FromStr for SortMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(SortMode::None),
            "shortest" | "shortest-first" => Ok(SortMode::ShortestFirst),
            "longest" | "longest-first" => Ok(SortMode::LongestFirst),
            _ => Err(ConfigError::InvalidValue {
                field: "sort_mode".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Session cookie pair for the feed.
///
/// Deliberately not serializable, and `Debug` redacts both values, so the
/// tokens cannot end up in a config file, log line or output artifact.
#[derive(Clone)]
pub struct Credentials {
    pub ct0: String,
    pub auth_token: String,
}

impl Credentials {
    pub fn new(ct0: String, auth_token: String) -> Self {
        Self { ct0, auth_token }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("ct0", &"<redacted>")
            .field("auth_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_parsing() {
        assert_eq!("latest".parse::<SearchMode>().unwrap(), SearchMode::Latest);
        assert_eq!("Top".parse::<SearchMode>().unwrap(), SearchMode::Top);
        assert!("hot".parse::<SearchMode>().is_err());
    }

    #[test]
    fn test_sort_mode_parsing() {
        assert_eq!("none".parse::<SortMode>().unwrap(), SortMode::None);
        assert_eq!(
            "shortest-first".parse::<SortMode>().unwrap(),
            SortMode::ShortestFirst
        );
        assert_eq!(
            "longest".parse::<SortMode>().unwrap(),
            SortMode::LongestFirst
        );
        assert!("newest".parse::<SortMode>().is_err());
    }

    #[test]
    fn test_credentials_debug_redacts_values() {
        let credentials = Credentials::new("secret_ct0".to_string(), "secret_auth".to_string());
        let rendered = format!("{:?}", credentials);
        assert!(!rendered.contains("secret_ct0"));
        assert!(!rendered.contains("secret_auth"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_normalized_post_serialization() {
        let post = NormalizedPost {
            sequence: 1,
            text: "Hello world".to_string(),
            tags: vec!["#rust".to_string()],
        };

        let serialized = serde_json::to_string(&post).unwrap();
        assert!(serialized.contains("\"sequence\":1"));
        assert!(serialized.contains("Hello world"));
        assert!(serialized.contains("#rust"));

        let deserialized: NormalizedPost = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, post);
    }
}
