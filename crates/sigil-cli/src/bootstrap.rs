use std::path::{Path, PathBuf};

use anyhow::Context;
use sigil_config::SigilConfig;
use sigil_core::Catalog;
use sigil_store::{ConfigStore, apply_plan};

use crate::cli::GlobalFlags;

/// Load configuration, honoring an explicit `--config` file.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<SigilConfig> {
    let config = match &flags.config {
        Some(path) => SigilConfig::load_with_file(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => SigilConfig::load_with_dotenv()?,
    };
    Ok(config)
}

/// Build a populated store from configuration and the catalog.
///
/// `catalog_override` takes precedence over `general.catalog`.
pub fn build_store(
    config: &SigilConfig,
    catalog_override: Option<&Path>,
) -> anyhow::Result<ConfigStore> {
    let catalog_path: PathBuf = match catalog_override {
        Some(path) => path.to_path_buf(),
        None => config
            .general
            .require_catalog()
            .context("no catalog configured; pass --catalog or set general.catalog")?,
    };

    let catalog = Catalog::from_path(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    if config.registration.is_empty() {
        tracing::warn!("registration plan is empty; the config store will have no entries");
    }

    let mut store = ConfigStore::new();
    apply_plan(&mut store, &catalog, &config.registration)
        .context("failed to apply registration plan")?;
    Ok(store)
}

/// Load config, build the store, and install it for the process.
pub fn init(flags: &GlobalFlags) -> anyhow::Result<&'static ConfigStore> {
    let config = load_config(flags)?;
    let store = build_store(&config, flags.catalog.as_deref())?;
    Ok(sigil_store::install(store)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use sigil_core::{GroupRegistration, RegistrationPlan, RootNode};

    use super::*;

    fn catalog_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".json")
            .tempfile()
            .expect("temp file");
        file.write_all(
            br#"{"packages": [{
                "name": "pkg.transforms",
                "all": ["Compose", "BaseTransform"],
                "classes": {
                    "Compose": {"module": "pkg.transforms.compose", "qualname": "Compose",
                                "init": [{"name": "self"}, {"name": "transforms"}]},
                    "BaseTransform": {"module": "pkg.transforms.base", "qualname": "BaseTransform"}
                }
            }]}"#,
        )
        .expect("write catalog");
        file
    }

    fn config() -> SigilConfig {
        SigilConfig {
            registration: RegistrationPlan {
                root: Some(RootNode::default()),
                groups: vec![GroupRegistration {
                    group: "transform".into(),
                    package: "pkg.transforms".into(),
                    exclude: vec!["BaseTransform".into()],
                }],
                singles: Vec::new(),
            },
            ..SigilConfig::default()
        }
    }

    #[test]
    fn build_store_applies_plan_from_catalog_override() {
        let file = catalog_file();
        let store = build_store(&config(), Some(file.path())).expect("store builds");

        assert_eq!(
            store.keys().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["config", "transform/Compose"]
        );
    }

    #[test]
    fn build_store_uses_configured_catalog() {
        let file = catalog_file();
        let mut config = config();
        config.general.catalog = file.path().display().to_string();

        let store = build_store(&config, None).expect("store builds");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn build_store_without_catalog_fails() {
        let error = build_store(&config(), None).expect_err("should fail");
        assert!(format!("{error:#}").contains("no catalog configured"));
    }

    #[test]
    fn build_store_reports_plan_errors() {
        let file = catalog_file();
        let mut config = config();
        config.registration.groups[0].package = "pkg.missing".into();

        let error = build_store(&config, Some(file.path())).expect_err("should fail");
        assert!(format!("{error:#}").contains("pkg.missing"));
    }
}
