//! Startup registration plan.
//!
//! The plan is the fixed sequence of registrations performed once at startup:
//! an optional group-less root node, bulk registration of packages into
//! groups, and individual classes registered under explicit keys.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn default_root_name() -> String {
    "config".to_string()
}

fn default_root_fields() -> Vec<String> {
    vec!["dataset".to_string()]
}

/// Group-less root node whose fields are all required and untyped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RootNode {
    #[serde(default = "default_root_name")]
    pub name: String,

    #[serde(default = "default_root_fields")]
    pub fields: Vec<String>,
}

impl Default for RootNode {
    fn default() -> Self {
        Self {
            name: default_root_name(),
            fields: default_root_fields(),
        }
    }
}

/// Register every export of `package` into `group`, except `exclude`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GroupRegistration {
    pub group: String,
    pub package: String,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Register the single attribute `name` of `package` into `group`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SingleRegistration {
    pub group: String,
    pub package: String,
    pub name: String,

    /// Key to store under; defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_as: Option<String>,
}

impl SingleRegistration {
    #[must_use]
    pub fn key_name(&self) -> &str {
        self.store_as.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RegistrationPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<RootNode>,

    #[serde(default)]
    pub groups: Vec<GroupRegistration>,

    #[serde(default)]
    pub singles: Vec<SingleRegistration>,
}

impl RegistrationPlan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.groups.is_empty() && self.singles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn root_defaults_to_config_with_dataset() {
        let root: RootNode = toml::from_str("").unwrap();
        assert_eq!(root.name, "config");
        assert_eq!(root.fields, vec!["dataset"]);
    }

    #[test]
    fn parses_full_plan() {
        let plan: RegistrationPlan = toml::from_str(
            r#"
[root]

[[groups]]
group = "transform"
package = "torch_geometric.transforms"
exclude = ["BaseTransform", "AddMetaPaths"]

[[singles]]
group = "dataset"
package = "torch_geometric.datasets"
name = "Planetoid"
"#,
        )
        .unwrap();

        assert_eq!(plan.root, Some(RootNode::default()));
        assert_eq!(plan.groups[0].exclude.len(), 2);
        assert_eq!(plan.singles[0].key_name(), "Planetoid");
        assert!(!plan.is_empty());
    }

    #[test]
    fn store_as_overrides_key_name() {
        let single = SingleRegistration {
            group: "dataset".into(),
            package: "pkg".into(),
            name: "Planetoid".into(),
            store_as: Some("cora".into()),
        };
        assert_eq!(single.key_name(), "cora");
    }

    #[test]
    fn default_plan_is_empty() {
        assert!(RegistrationPlan::default().is_empty());
    }
}
