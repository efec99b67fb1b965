//! Dataset-backed estimator replaying gold annotations
//!
//! Stands in for a real model runtime: sentences found in the dataset
//! get their gold tags back with probabilities saturated to 1.0/0.0,
//! everything else gets an empty row.

use crate::data::{align_tags, Dataset};
use crate::error::{QescopeError, QescopeResult};
use crate::model::{Predictions, QualityEstimator, Tag};

/// Replays a dataset's gold tags and HTER scores as predictions
pub struct GoldEstimator {
    dataset: Dataset,
    identity: String,
}

impl GoldEstimator {
    pub fn new(dataset: Dataset) -> Self {
        let identity = format!("gold:{}", dataset.name);
        Self { dataset, identity }
    }

    /// Row index for a sentence pair: an exact (source, target) match
    /// wins, then a target-only match.
    fn lookup(&self, source: &str, target: &str) -> Option<usize> {
        let target_rows: Vec<usize> = self
            .dataset
            .target_sentences
            .iter()
            .enumerate()
            .filter(|(_, t)| t.as_str() == target)
            .map(|(i, _)| i)
            .collect();

        target_rows
            .iter()
            .copied()
            .find(|&i| self.dataset.source_sentences[i] == source)
            .or_else(|| target_rows.first().copied())
    }

    fn parse_tags(&self, fields: Vec<String>) -> QescopeResult<Vec<Tag>> {
        fields
            .iter()
            .map(|field| {
                Tag::parse(field).ok_or_else(|| QescopeError::DatasetInvalid {
                    name: self.dataset.name.clone(),
                    reason: format!("unknown tag '{}'", field),
                })
            })
            .collect()
    }
}

fn saturated_probabilities(tags: &[Tag]) -> Vec<f32> {
    tags.iter()
        .map(|tag| if *tag == Tag::Bad { 1.0 } else { 0.0 })
        .collect()
}

impl QualityEstimator for GoldEstimator {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn predict(&self, sources: &[String], targets: &[String]) -> QescopeResult<Predictions> {
        let has_source_tags = self.dataset.source_tags.is_some();
        let mut predictions = Predictions {
            source_tags: has_source_tags.then(Vec::new),
            source_bad_probabilities: has_source_tags.then(Vec::new),
            ..Predictions::default()
        };

        for (source, target) in sources.iter().zip(targets.iter()) {
            let Some(row) = self.lookup(source, target) else {
                predictions.target_tags.push(Vec::new());
                predictions.target_bad_probabilities.push(Vec::new());
                predictions.sentence_hter.push(None);
                if let Some(tags) = predictions.source_tags.as_mut() {
                    tags.push(Vec::new());
                }
                if let Some(probs) = predictions.source_bad_probabilities.as_mut() {
                    probs.push(Vec::new());
                }
                continue;
            };

            let tags = self.parse_tags(self.dataset.aligned_target_tags(row)?)?;
            predictions
                .target_bad_probabilities
                .push(saturated_probabilities(&tags));
            predictions.target_tags.push(tags);
            predictions
                .sentence_hter
                .push(Some(self.dataset.sentence_scores[row]));

            if let Some(gold_source_tags) = &self.dataset.source_tags {
                let tokens = self.dataset.source_sentences[row]
                    .split_whitespace()
                    .count();
                let tags = self.parse_tags(align_tags(&gold_source_tags[row], tokens)?)?;
                if let Some(probs) = predictions.source_bad_probabilities.as_mut() {
                    probs.push(saturated_probabilities(&tags));
                }
                if let Some(rows) = predictions.source_tags.as_mut() {
                    rows.push(tags);
                }
            }
        }

        Ok(predictions)
    }
}
