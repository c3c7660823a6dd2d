//! Serialized class collections.
//!
//! A catalog is the on-disk form of one or more [`Package`]s, typically
//! produced by an exporter that introspects a Python package and records each
//! exported class's constructor signature:
//!
//! ```json
//! {
//!   "packages": [{
//!     "name": "torch_geometric.transforms",
//!     "all": ["Compose", "NormalizeFeatures"],
//!     "classes": {
//!       "NormalizeFeatures": {
//!         "module": "torch_geometric.transforms.normalize_features",
//!         "qualname": "NormalizeFeatures",
//!         "init": [
//!           {"name": "self"},
//!           {"name": "attrs", "annotation": "List[str]", "default": ["x"]}
//!         ]
//!       }
//!     }
//!   }]
//! }
//! ```
//!
//! The same shape is accepted as TOML. TOML has no null, so a `None` default
//! is written `default_none = true`.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use crate::class::{ClassDescriptor, Package};
use crate::errors::CoreError;

/// A set of packages available for registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    #[serde(default)]
    pub packages: Vec<CatalogPackage>,
}

/// One package: its export list and the classes reachable as attributes.
///
/// `classes` may hold attributes that are not exported; they can still be
/// registered individually.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CatalogPackage {
    pub name: String,

    /// Publicly exported names (`__all__`).
    #[serde(default)]
    pub all: Vec<String>,

    /// Attribute name to class descriptor.
    #[serde(default)]
    pub classes: BTreeMap<String, ClassDescriptor>,
}

impl Catalog {
    /// Load a catalog, choosing the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read,
    /// `CoreError::UnsupportedFormat` for extensions other than `json`/`toml`,
    /// or a parse error for malformed content.
    pub fn from_path(path: &Path) -> Result<Self, CoreError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let content = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match extension.as_deref() {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(CoreError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Json` if the content is not a valid catalog.
    pub fn from_json_str(content: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(content)?)
    }

    /// # Errors
    ///
    /// Returns `CoreError::Toml` if the content is not a valid catalog.
    pub fn from_toml_str(content: &str) -> Result<Self, CoreError> {
        Ok(toml::from_str(content)?)
    }

    /// Look up a package by its dotted name.
    #[must_use]
    pub fn package(&self, name: &str) -> Option<&CatalogPackage> {
        self.packages.iter().find(|package| package.name == name)
    }

    /// JSON Schema describing the catalog file format.
    ///
    /// # Panics
    ///
    /// Panics if `serde_json::to_value` fails on the `schemars` output, which
    /// is always JSON-serialisable.
    #[must_use]
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schema_for!(Self)).expect("schemars output is valid JSON")
    }
}

impl Package for CatalogPackage {
    fn name(&self) -> &str {
        &self.name
    }

    fn exports(&self) -> BTreeSet<&str> {
        self.all.iter().map(String::as_str).collect()
    }

    fn resolve(&self, name: &str) -> Option<&ClassDescriptor> {
        self.classes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::annotation::Annotation;

    const SAMPLE_JSON: &str = r#"{
        "packages": [{
            "name": "pkg.transforms",
            "all": ["Compose", "Normalize", "Compose"],
            "classes": {
                "Compose": {
                    "module": "pkg.transforms.compose",
                    "qualname": "Compose",
                    "init": [{"name": "self"}, {"name": "transforms"}]
                },
                "Normalize": {
                    "module": "pkg.transforms.normalize",
                    "qualname": "Normalize",
                    "init": [
                        {"name": "self"},
                        {"name": "norm", "annotation": "str", "default": "l2"},
                        {"name": "p", "annotation": "int", "default": 2}
                    ]
                }
            }
        }]
    }"#;

    #[test]
    fn parses_json_catalog() {
        let catalog = Catalog::from_json_str(SAMPLE_JSON).unwrap();
        let package = catalog.package("pkg.transforms").unwrap();

        assert_eq!(
            package.exports().into_iter().collect::<Vec<_>>(),
            vec!["Compose", "Normalize"]
        );

        let normalize = package.resolve("Normalize").unwrap();
        assert_eq!(normalize.path(), "pkg.transforms.normalize.Normalize");
        assert_eq!(
            normalize.parameters()[1].annotation,
            Some(Annotation::named("str"))
        );
        assert!(package.resolve("Missing").is_none());
    }

    #[test]
    fn parses_toml_catalog() {
        let catalog = Catalog::from_toml_str(
            r#"
[[packages]]
name = "pkg.datasets"
all = []

[packages.classes.Planetoid]
module = "pkg.datasets.planetoid"
qualname = "Planetoid"
init = [
    { name = "self" },
    { name = "root", annotation = "str" },
    { name = "split", annotation = "str", default = "public" },
]
"#,
        )
        .unwrap();

        let package = catalog.package("pkg.datasets").unwrap();
        assert!(package.exports().is_empty());
        let planetoid = package.resolve("Planetoid").unwrap();
        assert_eq!(planetoid.parameters().len(), 3);
        assert_eq!(planetoid.parameters()[2].default, Some("public".into()));
    }

    #[test]
    fn unknown_package_is_none() {
        let catalog = Catalog::from_json_str(SAMPLE_JSON).unwrap();
        assert!(catalog.package("pkg.datasets").is_none());
    }

    #[test]
    fn rejects_bad_annotation_in_catalog() {
        let result = Catalog::from_json_str(
            r#"{"packages": [{"name": "p", "classes": {
                "A": {"module": "p", "qualname": "A", "init": [{"name": "x", "annotation": "Union["}]}
            }}]}"#,
        );
        assert!(matches!(result, Err(CoreError::Json(_))));
    }
}
