//! Registry schemas for models and datasets
//!
//! Registries are TOML files mapping friendly names to records. Parsing
//! is strict: unrecognized keys are rejected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A registered pretrained quality-estimation model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    /// Language pair, e.g. "en-de"
    pub lp: String,

    /// Artifact reference: local path or http(s) URL
    pub url: String,
}

/// Model registry file: one `[models.<name>]` table per model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelRegistry {
    #[serde(default)]
    pub models: BTreeMap<String, ModelEntry>,
}

/// One dataset's file layout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetEntry {
    /// Base directory the member paths are anchored to
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Source-language sentences, one per line
    pub source: PathBuf,

    /// Target-language sentences, one per line
    pub target: PathBuf,

    /// Sentence-level HTER scores, one float per line
    pub sentence_scores: PathBuf,

    /// Gold target-side tags, one whitespace-separated line per sentence
    pub target_tags: PathBuf,

    /// Gold source-side tags (optional)
    #[serde(default)]
    pub source_tags: Option<PathBuf>,
}

impl DatasetEntry {
    /// Anchor relative paths: a relative `directory` is joined onto
    /// `base` (the registry file's parent), and relative member paths
    /// are joined onto `directory` when one is set.
    pub fn anchored(&self, base: &Path) -> Self {
        let directory = self.directory.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                base.join(dir)
            }
        });

        let anchor = |path: &PathBuf| -> PathBuf {
            match &directory {
                Some(dir) if !path.is_absolute() => dir.join(path),
                _ => path.clone(),
            }
        };

        let source = anchor(&self.source);
        let target = anchor(&self.target);
        let sentence_scores = anchor(&self.sentence_scores);
        let target_tags = anchor(&self.target_tags);
        let source_tags = self.source_tags.as_ref().map(|p| anchor(p));

        Self {
            source,
            target,
            sentence_scores,
            target_tags,
            source_tags,
            directory,
        }
    }
}

/// Dataset registry file: one `[datasets.<name>]` table per dataset
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetRegistry {
    #[serde(default)]
    pub datasets: BTreeMap<String, DatasetEntry>,
}
