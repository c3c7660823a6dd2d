use anyhow::Context;
use serde::Serialize;
use sigil_schema::{FieldDefault, Schema};
use sigil_store::ConfigStore;

use crate::cli::root_commands::ShowArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::commands::parse_key;
use crate::output;

#[derive(Debug, Serialize)]
struct SchemaView<'a> {
    key: &'a str,
    #[serde(flatten)]
    schema: &'a Schema,
}

#[derive(Debug, Serialize)]
pub struct FieldRow {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub default: String,
}

/// One row per field, with defaults rendered for display.
pub fn field_rows(schema: &Schema) -> Vec<FieldRow> {
    schema
        .fields()
        .iter()
        .map(|field| FieldRow {
            name: field.name.clone(),
            ty: field.ty.to_string(),
            default: match &field.default {
                FieldDefault::Missing => "<required>".to_string(),
                FieldDefault::Value(value) => value.to_string(),
                FieldDefault::Factory(value) => format!("{value} (copied)"),
            },
        })
        .collect()
}

/// Handle `sigil show`.
pub fn handle(args: &ShowArgs, store: &ConfigStore, flags: &GlobalFlags) -> anyhow::Result<()> {
    let (group, name) = parse_key(&args.key);
    let schema = store
        .get(group, name)
        .with_context(|| format!("no config entry '{}'", args.key))?;

    if flags.format == OutputFormat::Table {
        return output::output(&field_rows(schema), flags.format);
    }

    output::output(
        &SchemaView {
            key: &args.key,
            schema,
        },
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sigil_core::{Annotation, ClassDescriptor, Parameter};

    use super::*;

    #[test]
    fn rows_render_defaults() {
        let class = ClassDescriptor::new("pkg", "AddAttrs").with_init(vec![
            Parameter::new("self"),
            Parameter::new("attrs")
                .annotated(Annotation::parse("List[str]").unwrap())
                .with_default(serde_json::json!(["x"])),
            Parameter::new("strict"),
        ]);
        let schema = sigil_schema::synthesize(&class).unwrap();
        let rows = field_rows(&schema);

        assert_eq!(rows[0].ty, "List[str]");
        assert_eq!(rows[0].default, r#"["x"] (copied)"#);
        assert_eq!(rows[1].ty, "Any");
        assert_eq!(rows[1].default, "<required>");
        assert_eq!(rows[2].default, r#""pkg.AddAttrs""#);
    }

    #[test]
    fn view_flattens_schema() {
        let schema = sigil_schema::synthesize(&ClassDescriptor::new("pkg", "A")).unwrap();
        let value = serde_json::to_value(SchemaView {
            key: "g/A",
            schema: &schema,
        })
        .unwrap();
        assert_eq!(value["key"], "g/A");
        assert_eq!(value["name"], "A");
        assert_eq!(value["fields"][0]["name"], "_target_");
    }
}
