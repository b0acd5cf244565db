//! Session source configuration.

use serde::{Deserialize, Serialize};

fn default_cookie_file() -> String {
    "cookie.json".to_owned()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Path to the cookie export file.
    #[serde(default = "default_cookie_file")]
    pub cookie_file: String,

    /// Base64-encoded cookie JSON, typically injected via
    /// `VERBATIM_SESSION__BLOB`. Takes effect when the cookie file is
    /// absent.
    #[serde(default)]
    pub blob: Option<String>,

    /// URL of a published browser header dump to refresh the header
    /// profile from. Baked-in defaults are used when unset or unreachable.
    #[serde(default)]
    pub header_profile_url: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_file: default_cookie_file(),
            blob: None,
            header_profile_url: None,
        }
    }
}
