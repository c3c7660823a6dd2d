use anyhow::{Context, bail};
use serde_json::{Map, Value};
use sigil_store::ConfigStore;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InstantiateArgs;
use crate::commands::parse_key;
use crate::output;

/// Parse `field=value`. The value is JSON if it parses, otherwise a string.
pub fn parse_assignment(raw: &str) -> anyhow::Result<(String, Value)> {
    let Some((field, value)) = raw.split_once('=') else {
        bail!("invalid --set '{raw}': expected FIELD=VALUE");
    };

    let field = field.trim();
    if field.is_empty() {
        bail!("invalid --set '{raw}': field name is empty");
    }

    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((field.to_string(), value))
}

/// Handle `sigil instantiate`.
pub fn handle(
    args: &InstantiateArgs,
    store: &ConfigStore,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (group, name) = parse_key(&args.key);
    let schema = store
        .get(group, name)
        .with_context(|| format!("no config entry '{}'", args.key))?;

    let mut values = Map::new();
    for raw in &args.set {
        let (field, value) = parse_assignment(raw)?;
        values.insert(field, value);
    }

    let node = schema
        .instantiate(values)
        .with_context(|| format!("failed to instantiate '{}'", args.key))?;
    output::output(&node, flags.format)
}
