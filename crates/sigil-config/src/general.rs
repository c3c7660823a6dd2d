//! General application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the class catalog (`.json` or `.toml`). Empty when unset.
    #[serde(default)]
    pub catalog: String,
}

impl GeneralConfig {
    #[must_use]
    pub fn catalog_path(&self) -> Option<PathBuf> {
        let trimmed = self.catalog.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }

    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` if no catalog path is set.
    pub fn require_catalog(&self) -> Result<PathBuf, ConfigError> {
        self.catalog_path().ok_or_else(|| ConfigError::NotConfigured {
            field: "general.catalog".to_string(),
        })
    }
}
