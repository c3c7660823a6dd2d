//! The `(group, name)` keyed schema store.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use sigil_schema::Schema;

/// Registry key. A `None` group addresses a top-level node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConfigKey {
    pub group: Option<String>,
    pub name: String,
}

impl ConfigKey {
    #[must_use]
    pub fn new(group: Option<&str>, name: &str) -> Self {
        Self {
            group: group.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{group}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Store of synthesized schemas.
///
/// There is no removal operation. Storing under an existing key replaces the
/// entry (last write wins) and is logged at `warn`.
#[derive(Debug, Default)]
pub struct ConfigStore {
    entries: BTreeMap<ConfigKey, Arc<Schema>>,
}

impl ConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `node` under `(group, name)`, returning the entry it replaced.
    pub fn store(&mut self, group: Option<&str>, name: &str, node: Schema) -> Option<Arc<Schema>> {
        let key = ConfigKey::new(group, name);
        tracing::debug!(key = %key, schema = node.name(), "storing schema");

        let previous = self.entries.insert(key, Arc::new(node));
        if previous.is_some() {
            tracing::warn!(
                group = group.unwrap_or("<root>"),
                name,
                "config store entry overwritten"
            );
        }
        previous
    }

    #[must_use]
    pub fn get(&self, group: Option<&str>, name: &str) -> Option<&Arc<Schema>> {
        self.entries.get(&ConfigKey::new(group, name))
    }

    #[must_use]
    pub fn contains(&self, group: Option<&str>, name: &str) -> bool {
        self.get(group, name).is_some()
    }

    /// All keys in sorted order (root entries first).
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &Arc<Schema>)> {
        self.entries.iter()
    }

    /// Sorted entry names within a group (`None` lists root entries).
    #[must_use]
    pub fn list(&self, group: Option<&str>) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|key| key.group.as_deref() == group)
            .map(|key| key.name.as_str())
            .collect()
    }

    /// Distinct group names in sorted order.
    #[must_use]
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = self
            .entries
            .keys()
            .filter_map(|key| key.group.as_deref())
            .collect();
        groups.dedup();
        groups
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
