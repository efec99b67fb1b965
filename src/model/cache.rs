//! Process-lifetime memoization of prediction results
//!
//! Keyed by input identity: the estimator's identity string plus the
//! exact source and target sentences. Invalidation is explicit; there
//! is no implicit expiry.

use crate::error::QescopeResult;
use crate::model::{Predictions, QualityEstimator};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    model: String,
    source: String,
    target: String,
}

/// In-memory map from (model, source, target) to a one-row prediction
#[derive(Default)]
pub struct PredictionCache {
    entries: HashMap<CacheKey, Predictions>,
    hits: u64,
    misses: u64,
}

impl PredictionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predict a single sentence pair, reusing a memoized result when
    /// the same (model, source, target) triple was seen before.
    pub fn predict_one(
        &mut self,
        estimator: &dyn QualityEstimator,
        source: &str,
        target: &str,
    ) -> QescopeResult<Predictions> {
        let key = CacheKey {
            model: estimator.identity().to_string(),
            source: source.to_string(),
            target: target.to_string(),
        };

        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            return Ok(cached.clone());
        }

        let predictions =
            estimator.predict(&[source.to_string()], &[target.to_string()])?;
        self.misses += 1;
        self.entries.insert(key, predictions.clone());
        Ok(predictions)
    }

    /// Drop all memoized results
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (hits, misses) counters for this process
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
