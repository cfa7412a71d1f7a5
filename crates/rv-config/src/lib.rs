//! # rv-config
//!
//! Layered configuration loading for Ruleview using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`RULEVIEW_*` prefix, `__` as separator)
//! 2. Project-level `.ruleview/config.toml`
//! 3. User-level `~/.config/ruleview/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `RULEVIEW_API__BASE_URL` -> `api.base_url`,
//! `RULEVIEW_SCROLL__TAU_MS` -> `scroll.tau_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use rv_config::RvConfig;
//!
//! let config = RvConfig::load_with_dotenv().expect("config");
//! println!("rules endpoint: {}", config.api.rules_url());
//! ```

mod api;
mod error;
mod general;
mod layout;
mod scroll;
mod search;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use layout::LayoutConfig;
pub use scroll::ScrollConfig;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RvConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl RvConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`RvConfig::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`RvConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`RvConfig::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".ruleview/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("RULEVIEW_").split("__"))
    }

    /// Check cross-field constraints figment cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::InvalidValue`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.search.validate()?;
        self.scroll.validate()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ruleview").join("config.toml"))
    }
}
