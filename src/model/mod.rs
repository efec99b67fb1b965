//! Prediction interface for quality-estimation models
//!
//! The model runtime itself is an external collaborator: anything that
//! can be loaded from a local artifact path and asked to predict
//! per-token quality plugs in through [`QualityEstimator`]. This module
//! carries the data shapes, a dataset-backed estimator for use without a
//! model runtime, and the process-lifetime prediction memoization.

pub mod cache;
pub mod gold;

pub use cache::PredictionCache;
pub use gold::GoldEstimator;

use crate::error::QescopeResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-token quality tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tag {
    Ok,
    Bad,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Bad => "BAD",
        }
    }

    /// Parse a gold tag field
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OK" => Some(Self::Ok),
            "BAD" => Some(Self::Bad),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Batch prediction output, one row per input sentence pair.
///
/// A row with no tags means the estimator had nothing to say about that
/// pair (e.g. a gold replay for an unseen sentence).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Predictions {
    /// Per-token tags for each target sentence
    pub target_tags: Vec<Vec<Tag>>,
    /// Per-token probability of BAD for each target sentence
    pub target_bad_probabilities: Vec<Vec<f32>>,
    /// Source-side tags, when the model predicts them
    pub source_tags: Option<Vec<Vec<Tag>>>,
    /// Source-side probability of BAD
    pub source_bad_probabilities: Option<Vec<Vec<f32>>>,
    /// Sentence-level HTER per row, when available
    pub sentence_hter: Vec<Option<f32>>,
}

/// A loaded quality-estimation system.
///
/// `identity` must be stable for the lifetime of the estimator; it keys
/// the prediction memoization together with the input sentences.
pub trait QualityEstimator {
    fn identity(&self) -> &str;

    /// Predict per-token quality for each (source, target) pair.
    /// `sources` and `targets` must have equal length.
    fn predict(&self, sources: &[String], targets: &[String]) -> QescopeResult<Predictions>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_roundtrip() {
        assert_eq!(Tag::parse("OK"), Some(Tag::Ok));
        assert_eq!(Tag::parse("BAD"), Some(Tag::Bad));
        assert_eq!(Tag::parse("ok"), None);
        assert_eq!(Tag::Bad.to_string(), "BAD");
    }

    #[test]
    fn tag_serializes_uppercase() {
        let json = serde_json::to_string(&vec![Tag::Ok, Tag::Bad]).unwrap();
        assert_eq!(json, r#"["OK","BAD"]"#);
    }
}
