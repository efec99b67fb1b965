//! Registry loading and default locations
//!
//! Registries live at `~/.config/qescope/models.toml` and
//! `~/.config/qescope/data.toml` unless overridden; cached artifacts
//! default to `~/.cache/qescope/`.

pub mod schema;

pub use schema::{DatasetEntry, DatasetRegistry, ModelEntry, ModelRegistry};

use crate::error::{QescopeError, QescopeResult};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory registry files are looked up in by default
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qescope")
}

/// Default model registry path
pub fn default_models_path() -> PathBuf {
    config_dir().join("models.toml")
}

/// Default dataset registry path
pub fn default_data_path() -> PathBuf {
    config_dir().join("data.toml")
}

/// Default root directory for cached artifacts
pub fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("qescope")
}

fn load_registry<T: DeserializeOwned>(path: &Path) -> QescopeResult<T> {
    if !path.exists() {
        return Err(QescopeError::ConfigNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| QescopeError::io(format!("reading registry from {}", path.display()), e))?;
    toml::from_str(&content).map_err(|e| QescopeError::ConfigInvalid {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

impl ModelRegistry {
    /// Load a model registry, strictly
    pub fn load(path: &Path) -> QescopeResult<Self> {
        debug!("loading model registry from {}", path.display());
        load_registry(path)
    }

    /// Look up a model by its registered name
    pub fn get(&self, name: &str) -> QescopeResult<&ModelEntry> {
        self.models
            .get(name)
            .ok_or_else(|| QescopeError::ModelNotRegistered(name.to_string()))
    }
}

impl DatasetRegistry {
    /// Load a dataset registry, strictly, anchoring relative paths to
    /// the registry file's parent directory
    pub fn load(path: &Path) -> QescopeResult<Self> {
        debug!("loading dataset registry from {}", path.display());
        let mut registry: Self = load_registry(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for entry in registry.datasets.values_mut() {
            *entry = entry.anchored(base);
        }
        Ok(registry)
    }

    /// Look up a dataset by its registered name
    pub fn get(&self, name: &str) -> QescopeResult<&DatasetEntry> {
        self.datasets
            .get(name)
            .ok_or_else(|| QescopeError::DatasetNotRegistered(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_missing_registry_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.toml");

        let result = ModelRegistry::load(&path);
        assert!(matches!(result, Err(QescopeError::ConfigNotFound(_))));
    }

    #[test]
    fn load_and_lookup_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.toml");
        fs::write(
            &path,
            r#"
                [models.demo]
                lp = "en-de"
                url = "https://example.org/model.zip"
            "#,
        )
        .unwrap();

        let registry = ModelRegistry::load(&path).unwrap();
        assert_eq!(registry.get("demo").unwrap().lp, "en-de");
        assert!(matches!(
            registry.get("absent"),
            Err(QescopeError::ModelNotRegistered(_))
        ));
    }

    #[test]
    fn invalid_registry_reports_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("models.toml");
        fs::write(&path, "[models.demo]\nlp = 3\n").unwrap();

        match ModelRegistry::load(&path) {
            Err(QescopeError::ConfigInvalid { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected ConfigInvalid, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn dataset_registry_anchors_to_file_parent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.toml");
        fs::write(
            &path,
            r#"
                [datasets.wmt]
                directory = "wmt20"
                source = "dev.src"
                target = "dev.mt"
                sentence_scores = "dev.hter"
                target_tags = "dev.tags"
            "#,
        )
        .unwrap();

        let registry = DatasetRegistry::load(&path).unwrap();
        let entry = registry.get("wmt").unwrap();
        assert_eq!(entry.source, temp.path().join("wmt20").join("dev.src"));
    }

    #[test]
    fn default_paths_are_namespaced() {
        assert!(default_models_path().ends_with("qescope/models.toml"));
        assert!(default_data_path().ends_with("qescope/data.toml"));
        assert!(default_cache_root().ends_with("qescope"));
    }
}
