use serde::Serialize;
use sigil_store::ConfigStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ListArgs;
use crate::output;

#[derive(Debug, Serialize)]
pub struct EntryRow {
    pub key: String,
    pub schema: String,
    pub target: Option<String>,
    pub fields: usize,
    pub required: usize,
}

/// Rows for every entry, optionally limited to one group.
pub fn rows(store: &ConfigStore, group: Option<&str>) -> Vec<EntryRow> {
    store
        .iter()
        .filter(|(key, _)| group.is_none() || key.group.as_deref() == group)
        .map(|(key, schema)| EntryRow {
            key: key.to_string(),
            schema: schema.name().to_string(),
            target: schema.target().map(str::to_string),
            fields: schema.fields().len(),
            required: schema.required_fields().count(),
        })
        .collect()
}

/// Handle `sigil list`.
pub fn handle(args: &ListArgs, store: &ConfigStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    output::output(&rows(store, args.group.as_deref()), flags.format)
}
