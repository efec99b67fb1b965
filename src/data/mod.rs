//! Dataset loading for parallel sentence files with gold annotations

pub mod builtin;
pub mod tags;

pub use tags::align_tags;

use crate::config::DatasetEntry;
use crate::error::{QescopeError, QescopeResult};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Name used for the embedded sample dataset
pub const BUILTIN_NAME: &str = "sample-en-de";

/// An in-memory dataset of parallel sentences with gold QE annotations
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub source_sentences: Vec<String>,
    pub target_sentences: Vec<String>,
    /// Sentence-level HTER, parallel to the sentences
    pub sentence_scores: Vec<f32>,
    /// Raw gold tag lines; align with [`align_tags`] before use
    pub target_tags: Vec<String>,
    pub source_tags: Option<Vec<String>>,
}

impl Dataset {
    /// Load a dataset from the files a registry entry points at.
    ///
    /// All files must have the same number of lines.
    pub fn load(name: &str, entry: &DatasetEntry) -> QescopeResult<Self> {
        let source_sentences = read_lines(&entry.source)?;
        let target_sentences = read_lines(&entry.target)?;
        let score_lines = read_lines(&entry.sentence_scores)?;
        let target_tags = read_lines(&entry.target_tags)?;
        let source_tags = entry.source_tags.as_deref().map(read_lines).transpose()?;

        let rows = source_sentences.len();
        let lengths = [
            ("target", target_sentences.len()),
            ("sentence_scores", score_lines.len()),
            ("target_tags", target_tags.len()),
        ];
        for (field, len) in lengths {
            if len != rows {
                return Err(QescopeError::DatasetInvalid {
                    name: name.to_string(),
                    reason: format!("{} has {} lines, source has {}", field, len, rows),
                });
            }
        }
        if let Some(ref tags) = source_tags {
            if tags.len() != rows {
                return Err(QescopeError::DatasetInvalid {
                    name: name.to_string(),
                    reason: format!("source_tags has {} lines, source has {}", tags.len(), rows),
                });
            }
        }

        let sentence_scores = score_lines
            .iter()
            .map(|line| {
                line.trim().parse::<f32>().map_err(|_| {
                    QescopeError::DatasetInvalid {
                        name: name.to_string(),
                        reason: format!("unparseable sentence score '{}'", line),
                    }
                })
            })
            .collect::<QescopeResult<Vec<f32>>>()?;

        debug!("loaded dataset {} with {} sentence pairs", name, rows);
        Ok(Self {
            name: name.to_string(),
            source_sentences,
            target_sentences,
            sentence_scores,
            target_tags,
            source_tags,
        })
    }

    /// The embedded en-de sample dataset
    pub fn builtin() -> Self {
        Self {
            name: BUILTIN_NAME.to_string(),
            source_sentences: builtin::SOURCE_SENTENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            target_sentences: builtin::TARGET_SENTENCES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sentence_scores: builtin::SENTENCE_HTER.to_vec(),
            target_tags: builtin::TARGET_TAGS.iter().map(|s| s.to_string()).collect(),
            source_tags: None,
        }
    }

    /// Number of sentence pairs
    pub fn len(&self) -> usize {
        self.source_sentences.len()
    }

    /// Whether the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.source_sentences.is_empty()
    }

    /// Gold target tags for row `index`, aligned to its target tokens
    pub fn aligned_target_tags(&self, index: usize) -> QescopeResult<Vec<String>> {
        let tokens = self.target_sentences[index].split_whitespace().count();
        align_tags(&self.target_tags[index], tokens)
    }
}

fn read_lines(path: &Path) -> QescopeResult<Vec<String>> {
    let content = fs::read_to_string(path)
        .map_err(|e| QescopeError::io(format!("reading {}", path.display()), e))?;
    Ok(content.lines().map(|line| line.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_dataset(dir: &Path, scores: &str) -> DatasetEntry {
        fs::write(dir.join("dev.src"), "hello world\nsecond line\n").unwrap();
        fs::write(dir.join("dev.mt"), "hallo welt\nzweite zeile\n").unwrap();
        fs::write(dir.join("dev.hter"), scores).unwrap();
        fs::write(dir.join("dev.tags"), "OK BAD\nOK OK\n").unwrap();
        DatasetEntry {
            directory: None,
            source: dir.join("dev.src"),
            target: dir.join("dev.mt"),
            sentence_scores: dir.join("dev.hter"),
            target_tags: dir.join("dev.tags"),
            source_tags: None,
        }
    }

    #[test]
    fn loads_aligned_files() {
        let dir = TempDir::new().unwrap();
        let entry = write_dataset(dir.path(), "0.5\n0.0\n");

        let dataset = Dataset::load("dev", &entry).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.sentence_scores, vec![0.5, 0.0]);
        assert_eq!(dataset.aligned_target_tags(0).unwrap(), vec!["OK", "BAD"]);
    }

    #[test]
    fn rejects_line_count_mismatch() {
        let dir = TempDir::new().unwrap();
        let entry = write_dataset(dir.path(), "0.5\n");

        let result = Dataset::load("dev", &entry);
        assert!(matches!(result, Err(QescopeError::DatasetInvalid { .. })));
    }

    #[test]
    fn rejects_unparseable_scores() {
        let dir = TempDir::new().unwrap();
        let entry = write_dataset(dir.path(), "0.5\nnot-a-number\n");

        let result = Dataset::load("dev", &entry);
        assert!(matches!(result, Err(QescopeError::DatasetInvalid { .. })));
    }

    #[test]
    fn missing_file_reports_path() {
        let entry = DatasetEntry {
            directory: None,
            source: PathBuf::from("/missing/dev.src"),
            target: PathBuf::from("/missing/dev.mt"),
            sentence_scores: PathBuf::from("/missing/dev.hter"),
            target_tags: PathBuf::from("/missing/dev.tags"),
            source_tags: None,
        };
        assert!(matches!(
            Dataset::load("dev", &entry),
            Err(QescopeError::Io { .. })
        ));
    }

    #[test]
    fn builtin_dataset_is_consistent() {
        let dataset = Dataset::builtin();
        assert_eq!(dataset.len(), 10);
        assert!(!dataset.is_empty());
        for i in 0..dataset.len() {
            let tokens = dataset.target_sentences[i].split_whitespace().count();
            assert_eq!(dataset.aligned_target_tags(i).unwrap().len(), tokens);
        }
    }
}
