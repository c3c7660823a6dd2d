//! Registry error types.

use sigil_schema::SchemaError;
use thiserror::Error;

/// Errors from registration and installation.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// An exported or requested name is not a class attribute of the package.
    #[error("'{name}' does not resolve to a class in package {package}")]
    ResolutionFailure { package: String, name: String },

    /// The plan names a package the catalog does not contain.
    #[error("Package not found in catalog: {0}")]
    PackageNotFound(String),

    /// A store was already installed for this process.
    #[error("A config store is already installed")]
    AlreadyInstalled,

    /// Schema synthesis failed for a class.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
