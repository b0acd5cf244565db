//! Offline replay configuration.

use serde::{Deserialize, Serialize};

const fn default_parallel() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerifyConfig {
    /// Fan record verification out over a worker pool.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
        }
    }
}
