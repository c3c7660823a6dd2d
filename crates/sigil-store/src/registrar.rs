//! Bulk and single-class registration.

use sigil_core::{ClassDescriptor, Package};
use sigil_schema::synthesize;

use crate::error::RegistryError;
use crate::store::ConfigStore;

/// Register every exported class of `package` under `group`, skipping the
/// names in `exclude`. Each entry is stored under `(group, export name)`.
///
/// All names are resolved and synthesized before anything is stored, so a
/// failure leaves `store` untouched.
///
/// # Errors
///
/// Returns `RegistryError::ResolutionFailure` if an exported name has no
/// class behind it, or `RegistryError::Schema` if synthesis fails.
pub fn register<P>(
    store: &mut ConfigStore,
    group: &str,
    package: &P,
    exclude: &[&str],
) -> Result<usize, RegistryError>
where
    P: Package + ?Sized,
{
    let mut synthesized = Vec::new();
    for name in package.exports() {
        if exclude.contains(&name) {
            continue;
        }

        let class = package
            .resolve(name)
            .ok_or_else(|| RegistryError::ResolutionFailure {
                package: package.name().to_string(),
                name: name.to_string(),
            })?;
        synthesized.push((name, synthesize(class)?));
    }

    let count = synthesized.len();
    for (name, schema) in synthesized {
        store.store(Some(group), name, schema);
    }

    tracing::info!(group, package = package.name(), count, "registered package");
    Ok(count)
}

/// Register a single class under an explicit `(group, name)` key.
///
/// # Errors
///
/// Returns `RegistryError::Schema` if synthesis fails.
pub fn register_one(
    store: &mut ConfigStore,
    group: &str,
    name: &str,
    class: &ClassDescriptor,
) -> Result<(), RegistryError> {
    let schema = synthesize(class)?;
    store.store(Some(group), name, schema);
    tracing::info!(group, name, class = %class.path(), "registered class");
    Ok(())
}
