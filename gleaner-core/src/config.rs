use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, CoreError};
use crate::types::{SearchMode, SortMode};

/// Bounds on the global post limit accepted by `validate`.
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 1000;

/// Immutable configuration for one collection run.
///
/// Constructed per invocation and discarded afterwards. Credentials are
/// not part of the config; they travel separately so that a persisted
/// config file never contains session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub queries: Vec<String>,
    pub limit: usize,
    #[serde(default)]
    pub search_mode: SearchMode,
    #[serde(default)]
    pub sort_mode: SortMode,
}

impl RunConfig {
    pub fn new(
        queries: Vec<String>,
        limit: usize,
        search_mode: SearchMode,
        sort_mode: SortMode,
    ) -> Self {
        Self {
            queries,
            limit,
            search_mode,
            sort_mode,
        }
    }

    /// Loads a run configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, CoreError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        let config: RunConfig = toml::from_str(&raw).map_err(ConfigError::Parse)?;
        Ok(config)
    }

    /// Minimal validation before a run: at least one non-blank query and a
    /// bounded positive limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queries.is_empty() {
            return Err(ConfigError::NoQueries);
        }
        if let Some(blank) = self.queries.iter().find(|q| q.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "queries".to_string(),
                value: format!("{:?}", blank),
            });
        }
        if !(MIN_LIMIT..=MAX_LIMIT).contains(&self.limit) {
            return Err(ConfigError::InvalidValue {
                field: "limit".to_string(),
                value: self.limit.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> RunConfig {
        RunConfig::new(
            vec!["#rust".to_string(), "#tokio".to_string()],
            50,
            SearchMode::Latest,
            SortMode::None,
        )
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_queries_rejected() {
        let mut config = valid_config();
        config.queries.clear();
        assert!(matches!(config.validate(), Err(ConfigError::NoQueries)));
    }

    #[test]
    fn test_blank_query_rejected() {
        let mut config = valid_config();
        config.queries.push("   ".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "queries"
        ));
    }

    #[test]
    fn test_limit_bounds_enforced() {
        let mut config = valid_config();
        config.limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "limit"
        ));

        config.limit = MAX_LIMIT + 1;
        assert!(config.validate().is_err());

        config.limit = MAX_LIMIT;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let raw = r##"
            queries = ["#rust", "#tokio"]
            limit = 100
            search_mode = "top"
            sort_mode = "longest-first"
        "##;

        let config: RunConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.queries.len(), 2);
        assert_eq!(config.limit, 100);
        assert_eq!(config.search_mode, SearchMode::Top);
        assert_eq!(config.sort_mode, SortMode::LongestFirst);
    }

    #[test]
    fn test_toml_defaults_for_modes() {
        let raw = r##"
            queries = ["#rust"]
            limit = 10
        "##;

        let config: RunConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.search_mode, SearchMode::Latest);
        assert_eq!(config.sort_mode, SortMode::None);
    }
}
