//! Startup registration sequence.

use serde::Serialize;
use sigil_core::{Catalog, CatalogPackage, RegistrationPlan, RootNode};
use sigil_schema::{FieldSpec, FieldType, Schema, SchemaError};

use crate::error::RegistryError;
use crate::registrar::{register, register_one};
use crate::store::ConfigStore;

/// Counts of what [`apply_plan`] stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub root: bool,
    pub bulk: usize,
    pub singles: usize,
}

/// Hand-written root schema: every field required and untyped, no `_target_`.
///
/// # Errors
///
/// Returns `SchemaError::DuplicateField` if `root.fields` repeats a name.
pub fn root_schema(root: &RootNode) -> Result<Schema, SchemaError> {
    Schema::builder(capitalize(&root.name))
        .fields(
            root.fields
                .iter()
                .map(|field| FieldSpec::required(field.clone(), FieldType::Any)),
        )
        .build()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Run the startup sequence against `store`: the root node first, then bulk
/// group registrations, then single classes, each in plan order.
///
/// # Errors
///
/// Returns `RegistryError::PackageNotFound` for a package missing from the
/// catalog, `RegistryError::ResolutionFailure` for a name that is not a class,
/// or `RegistryError::Schema` if synthesis fails. Registrations completed
/// before the failing step remain in `store`.
pub fn apply_plan(
    store: &mut ConfigStore,
    catalog: &Catalog,
    plan: &RegistrationPlan,
) -> Result<PlanSummary, RegistryError> {
    let mut summary = PlanSummary::default();

    if let Some(root) = &plan.root {
        store.store(None, &root.name, root_schema(root)?);
        summary.root = true;
    }

    for entry in &plan.groups {
        let package = lookup(catalog, &entry.package)?;
        let exclude: Vec<&str> = entry.exclude.iter().map(String::as_str).collect();
        summary.bulk += register(store, &entry.group, package, &exclude)?;
    }

    for entry in &plan.singles {
        let package = lookup(catalog, &entry.package)?;
        let class = package
            .classes
            .get(&entry.name)
            .ok_or_else(|| RegistryError::ResolutionFailure {
                package: entry.package.clone(),
                name: entry.name.clone(),
            })?;
        register_one(store, &entry.group, entry.key_name(), class)?;
        summary.singles += 1;
    }

    tracing::info!(
        root = summary.root,
        bulk = summary.bulk,
        singles = summary.singles,
        "registration plan applied"
    );
    Ok(summary)
}

fn lookup<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a CatalogPackage, RegistryError> {
    catalog
        .package(name)
        .ok_or_else(|| RegistryError::PackageNotFound(name.to_string()))
}
