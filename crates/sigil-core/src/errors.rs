//! Cross-cutting error types for Sigil.
//!
//! Domain-specific errors (`SchemaError`, `RegistryError`, `ConfigError`) are
//! defined in their respective crates and converge into `anyhow` in `sigil-cli`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading descriptors and catalogs.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON was malformed.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog TOML was malformed.
    #[error("Invalid catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The catalog file extension is neither `.json` nor `.toml`.
    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    /// An annotation string could not be parsed.
    #[error("Invalid annotation '{input}': {reason}")]
    InvalidAnnotation { input: String, reason: String },
}
