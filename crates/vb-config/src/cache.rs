//! Capture store locations.

use serde::{Deserialize, Serialize};

fn default_dir() -> String {
    "cache".to_owned()
}

fn default_fixture_dir() -> String {
    "fixtures".to_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Directory holding one JSON file per captured response.
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Directory of auxiliary fixture payloads checked decode-only.
    #[serde(default = "default_fixture_dir")]
    pub fixture_dir: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            fixture_dir: default_fixture_dir(),
        }
    }
}
