//! # sigil-config
//!
//! Layered configuration loading for Sigil using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIGIL_*` prefix, `__` as separator)
//! 2. Project-level `.sigil/config.toml`
//! 3. User-level `~/.config/sigil/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIGIL_GENERAL__CATALOG` -> `general.catalog`. The `__`
//! (double underscore) separates nested config sections.
//!
//! # Registration plan
//!
//! The `[registration]` section is the startup sequence applied to the config
//! store:
//!
//! ```toml
//! [registration.root]
//! name = "config"
//! fields = ["dataset"]
//!
//! [[registration.groups]]
//! group = "transform"
//! package = "torch_geometric.transforms"
//! exclude = ["BaseTransform", "AddMetaPaths"]
//!
//! [[registration.singles]]
//! group = "dataset"
//! package = "torch_geometric.datasets"
//! name = "Planetoid"
//! ```

mod error;
mod general;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use sigil_core::RegistrationPlan;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SigilConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub registration: RegistrationPlan,
}

impl SigilConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with an explicit TOML file layered above the
    /// project-local file and below the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_file(path: &Path) -> Result<Self, ConfigError> {
        Self::base_figment()
            .merge(Toml::file(path))
            .merge(Self::env_provider())
            .extract()
            .map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source is malformed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Self::base_figment().merge(Self::env_provider())
    }

    /// Defaults plus TOML files, without the environment layer.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".sigil/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
    }

    fn env_provider() -> Env {
        Env::prefixed("SIGIL_").split("__")
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sigil").join("config.toml"))
    }

    /// Load `.env` from the current directory. Silently does nothing if absent.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}
