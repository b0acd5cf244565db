//! Live exploration configuration.

use serde::{Deserialize, Serialize};

/// Default hard ceiling on iterations per endpoint.
const fn default_max_iterations() -> usize {
    3
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExploreConfig {
    /// Hard ceiling on pagination iterations per endpoint.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Pause between iterations, in seconds, to respect rate limits.
    #[serde(default)]
    pub sleep_secs: f64,

    /// Fail fast on the first structural disagreement instead of scoring
    /// through it.
    #[serde(default)]
    pub strict: bool,

    /// Endpoint keys to explore. Empty means every catalog endpoint.
    #[serde(default)]
    pub endpoints: Vec<String>,

    /// Replacement endpoint catalog file. Unset means the built-in catalog.
    #[serde(default)]
    pub catalog_file: Option<String>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            sleep_secs: 0.0,
            strict: false,
            endpoints: Vec::new(),
            catalog_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ExploreConfig::default();
        assert_eq!(config.max_iterations, 3);
        assert_eq!(config.sleep_secs, 0.0);
        assert!(!config.strict);
        assert!(config.endpoints.is_empty());
        assert!(config.catalog_file.is_none());
    }
}
