//! # vb-config
//!
//! Layered configuration loading for verbatim using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`VERBATIM_*` prefix, `__` as separator)
//! 2. Project-level `verbatim.toml`
//! 3. User-level `~/.config/verbatim/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `VERBATIM_EXPLORE__MAX_ITERATIONS` -> `explore.max_iterations`,
//! `VERBATIM_SESSION__BLOB` -> `session.blob`, etc. The `__` (double
//! underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use vb_config::VerbatimConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = VerbatimConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = VerbatimConfig::load().expect("config");
//!
//! assert_eq!(config.explore.max_iterations, 3);
//! ```

mod cache;
mod error;
mod explore;
mod scenarios;
mod session;
mod verify;

pub use cache::CacheConfig;
pub use error::ConfigError;
pub use explore::ExploreConfig;
pub use scenarios::ScenarioConfig;
pub use session::SessionConfig;
pub use verify::VerifyConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerbatimConfig {
    #[serde(default)]
    pub explore: ExploreConfig,
    #[serde(default)]
    pub verify: VerifyConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub scenarios: ScenarioConfig,
}

impl VerbatimConfig {
    /// Load configuration from all sources (TOML files + environment
    /// variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if any layer fails to merge or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] if any layer fails to merge or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from("verbatim.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("VERBATIM_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("verbatim").join("config.toml"))
    }
}
