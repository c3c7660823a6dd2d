//! Schema instances.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::schema::TARGET_FIELD;

/// A constructed instance of a [`Schema`](crate::Schema).
///
/// Holds one value per schema field in schema order. Serializes as a JSON
/// object in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigNode {
    schema: String,
    entries: Vec<(String, Value)>,
}

impl ConfigNode {
    pub(crate) const fn new(schema: String, entries: Vec<(String, Value)>) -> Self {
        Self { schema, entries }
    }

    /// Name of the schema this node was instantiated from.
    #[must_use]
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.entries
            .iter_mut()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Replace a field's value.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::UnknownField` if the schema has no such field.
    pub fn set(&mut self, field: &str, value: Value) -> Result<(), SchemaError> {
        match self.get_mut(field) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(SchemaError::UnknownField {
                schema: self.schema.clone(),
                field: field.to_string(),
            }),
        }
    }

    /// Dotted path of the class to reconstruct, if the node carries one.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.get(TARGET_FIELD).and_then(Value::as_str)
    }

    /// All fields except `_target_`, as constructor keyword arguments.
    #[must_use]
    pub fn kwargs(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .filter(|(name, _)| name != TARGET_FIELD)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }
}

impl Serialize for ConfigNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
