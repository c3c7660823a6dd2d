//! Schema field descriptors.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// Type tag of a schema field.
///
/// This is the representable subset of annotations: unions other than
/// `Optional[T]` are narrowed away before they reach a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum FieldType {
    Any,
    NoneType,
    Named(String),
    Optional(Box<FieldType>),
}

impl FieldType {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("Any"),
            Self::NoneType => f.write_str("None"),
            Self::Named(name) => f.write_str(name),
            Self::Optional(inner) => write!(f, "Optional[{inner}]"),
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.to_string()
    }
}

/// How a field obtains its value when an instance does not supply one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldDefault {
    /// No default: the field must be supplied.
    Missing,
    /// Immutable default used as-is.
    Value(Value),
    /// Mutable container default; every instance receives its own copy.
    Factory(Value),
}

impl FieldDefault {
    /// Classify a declared default. Arrays and objects are mutable containers.
    #[must_use]
    pub fn from_declared(default: Option<&Value>) -> Self {
        match default {
            None => Self::Missing,
            Some(value @ (Value::Array(_) | Value::Object(_))) => Self::Factory(value.clone()),
            Some(value) => Self::Value(value.clone()),
        }
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Produce the value for a new instance, or `None` if the field is required.
    #[must_use]
    pub fn produce(&self) -> Option<Value> {
        match self {
            Self::Missing => None,
            Self::Value(value) => Some(value.clone()),
            Self::Factory(template) => Some(template.clone()),
        }
    }
}

/// One schema field: the parameter descriptor `(name, type, default)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: FieldType,
    pub default: FieldDefault,
}

impl FieldSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType, default: FieldDefault) -> Self {
        Self {
            name: name.into(),
            ty,
            default,
        }
    }

    /// A required field of the given type.
    #[must_use]
    pub fn required(name: impl Into<String>, ty: FieldType) -> Self {
        Self::new(name, ty, FieldDefault::Missing)
    }
}
