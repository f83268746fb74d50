// src/core/stats.rs
use crate::core::types::{CharPair, CountTable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The frozen statistics every model reads from: five occurrence-count
/// tables, the vocabulary frequency map, and the totals derived from them.
/// Built once, then shared read-only behind an `Arc` for the lifetime of the
/// corrector; no method takes `&mut self`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsStore {
    unigrams: CountTable<char>,
    bigrams: CountTable<CharPair>,
    substitutions: CountTable<CharPair>,
    deletions: CountTable<CharPair>,
    insertions: CountTable<CharPair>,
    vocabulary: HashMap<String, u64>,
    total_word_count: u64,
    vocabulary_size: u64,
    total_unigram_count: u64,
    total_bigram_count: u64,
}

impl StatisticsStore {
    /// Assembles the store from already-parsed tables and computes the
    /// derived totals, which stay fixed from here on.
    pub fn new(
        unigrams: CountTable<char>,
        bigrams: CountTable<CharPair>,
        substitutions: CountTable<CharPair>,
        deletions: CountTable<CharPair>,
        insertions: CountTable<CharPair>,
        vocabulary: HashMap<String, u64>,
    ) -> Self {
        let total_word_count = vocabulary.values().sum();
        let vocabulary_size = vocabulary.len() as u64;
        let total_unigram_count = unigrams.total();
        let total_bigram_count = bigrams.total();
        Self {
            unigrams,
            bigrams,
            substitutions,
            deletions,
            insertions,
            vocabulary,
            total_word_count,
            vocabulary_size,
            total_unigram_count,
            total_bigram_count,
        }
    }

    /// Corpus count of the single character `c`.
    pub fn unigram(&self, c: char) -> u64 {
        self.unigrams.get(&c)
    }

    /// Corpus count of the adjacent character pair `first`,`second`.
    pub fn bigram(&self, first: char, second: char) -> u64 {
        self.bigrams.get(&(first, second))
    }

    /// Times `original` was observed typed as `typed`.
    pub fn substitution(&self, original: char, typed: char) -> u64 {
        self.substitutions.get(&(original, typed))
    }

    /// Times `deleted` was dropped after `prefix`.
    pub fn deletion(&self, prefix: char, deleted: char) -> u64 {
        self.deletions.get(&(prefix, deleted))
    }

    /// Times `added` was spuriously inserted after `prefix`.
    pub fn insertion(&self, prefix: char, added: char) -> u64 {
        self.insertions.get(&(prefix, added))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains_key(word)
    }

    /// Vocabulary frequency of `word`, zero for unknown words.
    pub fn word_frequency(&self, word: &str) -> u64 {
        self.vocabulary.get(word).copied().unwrap_or(0)
    }

    pub fn vocabulary(&self) -> &HashMap<String, u64> {
        &self.vocabulary
    }

    /// Sum of all vocabulary frequencies.
    pub fn total_word_count(&self) -> u64 {
        self.total_word_count
    }

    /// Number of distinct vocabulary entries.
    pub fn vocabulary_size(&self) -> u64 {
        self.vocabulary_size
    }

    pub fn total_unigram_count(&self) -> u64 {
        self.total_unigram_count
    }

    pub fn total_bigram_count(&self) -> u64 {
        self.total_bigram_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> StatisticsStore {
        let unigrams = [('a', 10), ('b', 4)].into_iter().collect();
        let bigrams = [(('a', 'b'), 6)].into_iter().collect();
        let vocabulary =
            HashMap::from([("aba".to_string(), 30), ("ab".to_string(), 12)]);
        StatisticsStore::new(
            unigrams,
            bigrams,
            CountTable::new(),
            CountTable::new(),
            CountTable::new(),
            vocabulary,
        )
    }

    #[test]
    fn derived_totals() {
        let stats = store();
        assert_eq!(stats.total_word_count(), 42);
        assert_eq!(stats.vocabulary_size(), 2);
        assert_eq!(stats.total_unigram_count(), 14);
        assert_eq!(stats.total_bigram_count(), 6);
    }

    #[test]
    fn lookups_default_to_zero() {
        let stats = store();
        assert_eq!(stats.unigram('z'), 0);
        assert_eq!(stats.bigram('b', 'a'), 0);
        assert_eq!(stats.substitution('a', 'b'), 0);
        assert_eq!(stats.word_frequency("missing"), 0);
        assert!(stats.contains("aba"));
        assert!(!stats.contains("missing"));
    }
}
