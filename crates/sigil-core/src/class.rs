//! Introspected class descriptors.
//!
//! A `ClassDescriptor` is the reflection input for schema synthesis: where the
//! class lives (`module`, `qualname`) and the parameters its constructor
//! declares, in declaration order. Descriptors are built in code or loaded from
//! a [`Catalog`](crate::Catalog).

use std::borrow::Cow;
use std::collections::BTreeSet;

use schemars::{JsonSchema, Schema, SchemaGenerator};
use serde::{Deserialize, Deserializer, Serialize};

use crate::annotation::Annotation;

/// One declared constructor parameter.
///
/// TOML has no null, so a catalog written in TOML declares a `None` default
/// with `default_none = true` instead of `default = null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ParameterRepr")]
pub struct Parameter {
    pub name: String,

    /// Declared type. `None` when the parameter is not annotated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,

    /// Default value. `None` when the parameter has no default; an explicit
    /// `null` default is `Some(Value::Null)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

/// Catalog form of a [`Parameter`].
#[derive(Deserialize, JsonSchema)]
#[schemars(rename = "Parameter")]
struct ParameterRepr {
    name: String,

    #[serde(default)]
    annotation: Option<Annotation>,

    #[serde(default, deserialize_with = "present_value")]
    #[schemars(with = "Option<serde_json::Value>")]
    default: Option<serde_json::Value>,

    /// Declares a `None` default without a null literal.
    #[serde(default)]
    default_none: bool,
}

/// Distinguishes an explicit `null` from an absent key.
fn present_value<'de, D>(deserializer: D) -> Result<Option<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

impl TryFrom<ParameterRepr> for Parameter {
    type Error = String;

    fn try_from(repr: ParameterRepr) -> Result<Self, Self::Error> {
        let default = match (repr.default, repr.default_none) {
            (Some(value), true) if !value.is_null() => {
                return Err(format!(
                    "parameter `{}` sets both `default` and `default_none`",
                    repr.name
                ));
            }
            (_, true) => Some(serde_json::Value::Null),
            (default, false) => default,
        };
        Ok(Self {
            name: repr.name,
            annotation: repr.annotation,
            default,
        })
    }
}

impl JsonSchema for Parameter {
    fn schema_name() -> Cow<'static, str> {
        ParameterRepr::schema_name()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        ParameterRepr::json_schema(generator)
    }
}

impl Parameter {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    #[must_use]
    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotation = Some(annotation);
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Reflection data for a single class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ClassDescriptor {
    /// Dotted module path, e.g. `torch_geometric.transforms.normalize_features`.
    pub module: String,

    /// Qualified name within the module, e.g. `NormalizeFeatures` or `Outer.Inner`.
    pub qualname: String,

    /// Constructor parameters in declaration order, including any receiver or
    /// variadic catch-alls. `None` when the class declares no constructor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Vec<Parameter>>,
}

impl ClassDescriptor {
    #[must_use]
    pub fn new(module: impl Into<String>, qualname: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            qualname: qualname.into(),
            init: None,
        }
    }

    #[must_use]
    pub fn with_init(mut self, params: Vec<Parameter>) -> Self {
        self.init = Some(params);
        self
    }

    /// Fully-qualified dotted path: `module.qualname`.
    #[must_use]
    pub fn path(&self) -> String {
        format!("{}.{}", self.module, self.qualname)
    }

    /// Declared constructor parameters; empty when there is no constructor.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        self.init.as_deref().unwrap_or_default()
    }
}

/// A named collection of classes with a public export list.
pub trait Package {
    /// Dotted package name, used in diagnostics.
    fn name(&self) -> &str;

    /// Publicly exported symbol names. Duplicates are not meaningful.
    fn exports(&self) -> BTreeSet<&str>;

    /// Resolve an attribute of the package to a class.
    fn resolve(&self, name: &str) -> Option<&ClassDescriptor>;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn path_joins_module_and_qualname() {
        let class = ClassDescriptor::new("pkg.transforms", "Outer.Inner");
        assert_eq!(class.path(), "pkg.transforms.Outer.Inner");
    }

    #[test]
    fn missing_constructor_has_no_parameters() {
        let class = ClassDescriptor::new("pkg", "Empty");
        assert!(class.init.is_none());
        assert!(class.parameters().is_empty());
    }

    #[test]
    fn null_default_is_distinct_from_no_default() {
        let with_null: Parameter =
            serde_json::from_value(json!({"name": "x", "default": null})).unwrap();
        let without: Parameter = serde_json::from_value(json!({"name": "x"})).unwrap();

        assert_eq!(with_null.default, Some(serde_json::Value::Null));
        assert_eq!(without.default, None);
    }

    #[test]
    fn default_none_flag_is_a_null_default() {
        let param: Parameter = toml::from_str(
            r#"
            name = "seed"
            annotation = "Optional[int]"
            default_none = true
            "#,
        )
        .unwrap();
        assert_eq!(param.default, Some(serde_json::Value::Null));

        let required: Parameter = toml::from_str(r#"name = "seed""#).unwrap();
        assert_eq!(required.default, None);
    }

    #[test]
    fn default_none_conflicts_with_a_value() {
        let error = serde_json::from_value::<Parameter>(
            json!({"name": "seed", "default": 3, "default_none": true}),
        )
        .unwrap_err();
        assert!(error.to_string().contains("default_none"));

        let agreeing: Parameter = serde_json::from_value(
            json!({"name": "seed", "default": null, "default_none": true}),
        )
        .unwrap();
        assert_eq!(agreeing.default, Some(serde_json::Value::Null));
    }

    #[test]
    fn parameter_roundtrip_keeps_annotation_string() {
        let param = Parameter::new("p")
            .annotated(Annotation::named("int"))
            .with_default(2);
        let value = serde_json::to_value(&param).unwrap();
        assert_eq!(value, json!({"name": "p", "annotation": "int", "default": 2}));

        let back: Parameter = serde_json::from_value(value).unwrap();
        assert_eq!(back, param);
    }
}
