//! The schema record type.
//!
//! A `Schema` is a type definition, not an instance: an ordered list of field
//! descriptors that cannot be modified once built. Two schemas compare equal
//! when their shapes (name, field names, types, defaults) are equal.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::field::{FieldDefault, FieldSpec};
use crate::node::ConfigNode;

/// Provenance field appended to every synthesized schema.
pub const TARGET_FIELD: &str = "_target_";

/// An immutable, ordered config schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    #[must_use]
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Names of fields without a default.
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|field| field.default.is_required())
            .map(|field| field.name.as_str())
    }

    /// Dotted path of the class this schema was derived from.
    ///
    /// `None` for hand-written schemas without a `_target_` field.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        match &self.field(TARGET_FIELD)?.default {
            FieldDefault::Value(Value::String(path)) => Some(path),
            _ => None,
        }
    }

    /// Construct an instance from explicitly supplied field values.
    ///
    /// Fields not present in `values` take their default; mutable container
    /// defaults are copied per instance.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownField` if `values` names a field the
    /// schema does not declare, or `SchemaError::MissingRequiredField` if a
    /// field without a default is not supplied.
    pub fn instantiate(&self, mut values: Map<String, Value>) -> Result<ConfigNode, SchemaError> {
        if let Some(unknown) = values.keys().find(|key| self.field(key).is_none()) {
            return Err(SchemaError::UnknownField {
                schema: self.name.clone(),
                field: unknown.clone(),
            });
        }

        let mut entries = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            let value = match values.remove(&field.name) {
                Some(value) => value,
                None => field
                    .default
                    .produce()
                    .ok_or_else(|| SchemaError::MissingRequiredField {
                        schema: self.name.clone(),
                        field: field.name.clone(),
                    })?,
            };
            entries.push((field.name.clone(), value));
        }

        Ok(ConfigNode::new(self.name.clone(), entries))
    }

    /// Construct an instance using only defaults.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::MissingRequiredField` if any field is required.
    pub fn instantiate_defaults(&self) -> Result<ConfigNode, SchemaError> {
        self.instantiate(Map::new())
    }
}

/// Accumulates fields in order; [`build`](Self::build) enforces unique names.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldSpec>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// # Errors
    ///
    /// Returns `SchemaError::DuplicateField` if two fields share a name.
    pub fn build(self) -> Result<Schema, SchemaError> {
        let mut seen = HashSet::with_capacity(self.fields.len());
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    schema: self.name,
                    field: field.name.clone(),
                });
            }
        }

        Ok(Schema {
            name: self.name,
            fields: self.fields,
        })
    }
}
