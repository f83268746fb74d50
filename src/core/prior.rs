// src/core/prior.rs
use crate::core::stats::StatisticsStore;
use std::sync::Arc;

/// The language model: an add-one smoothed prior over vocabulary frequency.
/// Generated candidates always have a positive frequency, but the smoothing
/// is applied uniformly so the estimator is well-defined for any word.
pub struct PriorModel {
    stats: Arc<StatisticsStore>,
}

impl PriorModel {
    pub fn new(stats: Arc<StatisticsStore>) -> Self {
        Self { stats }
    }

    /// ln((freq(word) + 1) / (total_word_count + vocabulary_size)).
    pub fn log_prior(&self, word: &str) -> f64 {
        let count = self.stats.word_frequency(word);
        let denominator =
            (self.stats.total_word_count() + self.stats.vocabulary_size()) as f64;
        ((count + 1) as f64 / denominator).ln()
    }
}
