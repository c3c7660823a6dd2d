//! Process-wide store.
//!
//! The store is populated as an owned value during startup and installed once.
//! Later readers get a shared, immutable reference.

use std::sync::OnceLock;

use crate::error::RegistryError;
use crate::store::ConfigStore;

static INSTALLED: OnceLock<ConfigStore> = OnceLock::new();

/// Publish `store` for the rest of the process.
///
/// # Errors
///
/// Returns `RegistryError::AlreadyInstalled` if a store was installed earlier;
/// the earlier store stays in place and `store` is dropped.
pub fn install(store: ConfigStore) -> Result<&'static ConfigStore, RegistryError> {
    let mut fresh = false;
    let installed = INSTALLED.get_or_init(|| {
        fresh = true;
        store
    });

    if fresh {
        tracing::debug!(entries = installed.len(), "config store installed");
        Ok(installed)
    } else {
        Err(RegistryError::AlreadyInstalled)
    }
}

/// The installed store, if [`install`] has run.
#[must_use]
pub fn installed() -> Option<&'static ConfigStore> {
    INSTALLED.get()
}
