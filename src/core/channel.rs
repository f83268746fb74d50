// src/core/channel.rs
use crate::core::stats::StatisticsStore;
use crate::core::types::BOUNDARY;
use std::cmp::Ordering;
use std::sync::Arc;

/// The error model: P(typo | candidate) for a pair known to differ by one
/// primitive edit. Classifies the edit by length comparison, locates it by
/// scanning for the first divergence, and applies add-one smoothing with a
/// local context count and a global total in the denominator. The context
/// source differs per edit type (bigram for deletions, unigram or the total
/// word count for insertions, unigram for substitutions); that asymmetry is
/// kept for compatibility with the statistics this model was trained
/// against.
pub struct ChannelModel {
    stats: Arc<StatisticsStore>,
}

impl ChannelModel {
    pub fn new(stats: Arc<StatisticsStore>) -> Self {
        Self { stats }
    }

    /// Log probability of observing `typo` as a typed form of `candidate`.
    ///
    /// Pairs that do not differ by exactly one edit score
    /// `f64::NEG_INFINITY` instead of panicking; the candidate generator
    /// never produces such a pair.
    pub fn log_channel(&self, typo: &str, candidate: &str) -> f64 {
        let typo = with_boundary(typo);
        let candidate = with_boundary(candidate);
        match typo.len().cmp(&candidate.len()) {
            Ordering::Less => self.deletion_score(&typo, &candidate),
            Ordering::Greater => self.insertion_score(&typo, &candidate),
            Ordering::Equal => self.same_length_score(&typo, &candidate),
        }
    }

    /// The typo is missing one character of the candidate.
    fn deletion_score(&self, typo: &[char], candidate: &[char]) -> f64 {
        for i in 0..candidate.len() {
            if i >= typo.len() || typo[i] != candidate[i] {
                // The boundary marker matches at index 0, so i >= 1 and the
                // (prefix, deleted) bigram window always exists here.
                let prefix = candidate[i - 1];
                let deleted = candidate[i];
                let deletion_count = self.stats.deletion(prefix, deleted);
                let context_count = self.stats.bigram(prefix, deleted);
                return smoothed(
                    deletion_count,
                    context_count,
                    self.stats.total_bigram_count(),
                );
            }
        }
        f64::NEG_INFINITY
    }

    /// The typo carries one character the candidate does not have.
    fn insertion_score(&self, typo: &[char], candidate: &[char]) -> f64 {
        for i in 0..typo.len() {
            if i >= candidate.len() || typo[i] != candidate[i] {
                let prefix = candidate[i - 1];
                let added = typo[i];
                let insertion_count = self.stats.insertion(prefix, added);
                // An insertion at the very start of the word has only the
                // boundary as context; the total word count stands in for a
                // character count there.
                let context_count = if prefix == BOUNDARY {
                    self.stats.total_word_count()
                } else {
                    self.stats.unigram(prefix)
                };
                return smoothed(
                    insertion_count,
                    context_count,
                    self.stats.total_unigram_count(),
                );
            }
        }
        f64::NEG_INFINITY
    }

    /// Equal lengths: a substitution (one differing position) or an
    /// adjacent transposition (two differing positions whose characters are
    /// swapped).
    fn same_length_score(&self, typo: &[char], candidate: &[char]) -> f64 {
        let diffs: Vec<usize> = (0..typo.len())
            .filter(|&i| typo[i] != candidate[i])
            .collect();

        match diffs.as_slice() {
            [i] => {
                let substitution_count =
                    self.stats.substitution(candidate[*i], typo[*i]);
                let context_count = self.stats.unigram(candidate[*i]);
                smoothed(
                    substitution_count,
                    context_count,
                    self.stats.total_unigram_count(),
                )
            }
            [i, j]
                if *j == *i + 1
                    && typo[*i] == candidate[*j]
                    && typo[*j] == candidate[*i] =>
            {
                // No transposition table exists; fall back to a flat
                // uniform estimate over the corpus.
                (1.0 / self.stats.total_word_count() as f64).ln()
            }
            _ => f64::NEG_INFINITY,
        }
    }
}

fn with_boundary(word: &str) -> Vec<char> {
    std::iter::once(BOUNDARY).chain(word.chars()).collect()
}

/// Add-one smoothing: ln((count + 1) / (context + total)).
fn smoothed(count: u64, context: u64, total: u64) -> f64 {
    ((count + 1) as f64 / (context + total) as f64).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::StatisticsStore;
    use crate::core::types::CountTable;
    use std::collections::HashMap;

    const EPSILON: f64 = 1e-12;

    fn model() -> ChannelModel {
        // total_unigram_count = 60, total_bigram_count = 25,
        // total_word_count = 100.
        let unigrams = [('a', 20), ('c', 15), ('k', 10), ('e', 15)]
            .into_iter()
            .collect();
        let bigrams = [(('k', 'e'), 12), (('c', 'a'), 13)].into_iter().collect();
        let substitutions = [(('a', 'e'), 4)].into_iter().collect();
        let deletions = [(('k', 'e'), 6)].into_iter().collect();
        let insertions = [(('a', 'a'), 3), (('#', 'x'), 2)].into_iter().collect();
        let vocabulary = HashMap::from([("cake".to_string(), 100)]);
        let stats = StatisticsStore::new(
            unigrams,
            bigrams,
            substitutions,
            deletions,
            insertions,
            vocabulary,
        );
        ChannelModel::new(Arc::new(stats))
    }

    #[test]
    fn deletion_uses_bigram_context() {
        let model = model();
        // "cak" from "cake": 'e' deleted after 'k'.
        // (del_count + 1) / (bigram("ke") + total_bigrams) = 7 / 37.
        let got = model.log_channel("cak", "cake");
        assert!((got - (7.0f64 / 37.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn deletion_with_unseen_counts_still_scores() {
        let model = model();
        // "cae" from "cake": 'k' deleted after 'a'. Neither the deletion
        // pair nor the bigram was ever observed, so add-one smoothing
        // carries the whole estimate: 1 / 25.
        let got = model.log_channel("cae", "cake");
        assert!((got - (1.0f64 / 25.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn insertion_uses_unigram_context() {
        let model = model();
        // "caake" from "cake": 'a' inserted after 'a'.
        // (ins_count + 1) / (unigram('a') + total_unigrams) = 4 / 80.
        let got = model.log_channel("caake", "cake");
        assert!((got - (4.0f64 / 80.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn insertion_at_word_start_uses_total_word_count() {
        let model = model();
        // "xcake" from "cake": context is the boundary marker.
        // (ins_count + 1) / (total_word_count + total_unigrams) = 3 / 160.
        let got = model.log_channel("xcake", "cake");
        assert!((got - (3.0f64 / 160.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn substitution_keys_on_candidate_then_typo_char() {
        let model = model();
        // "cake" typed as "ckke": candidate char 'a', typo char 'k' -> unseen
        // pair, numerator 1. Context unigram('a') = 20, denominator 80.
        let got = model.log_channel("ckke", "cake");
        assert!((got - (1.0f64 / 80.0).ln()).abs() < EPSILON);

        // "cake" typed as "ceke": seen pair ('a','e'), numerator 5.
        let got = model.log_channel("ceke", "cake");
        assert!((got - (5.0f64 / 80.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn transposition_is_flat() {
        let model = model();
        // "acke" swaps the first two characters of "cake".
        let got = model.log_channel("acke", "cake");
        assert!((got - (1.0f64 / 100.0).ln()).abs() < EPSILON);
    }

    #[test]
    fn unclassifiable_pairs_score_negative_infinity() {
        let model = model();
        // Two non-adjacent diffs.
        assert_eq!(model.log_channel("cukq", "cake"), f64::NEG_INFINITY);
        // Two adjacent diffs that are not a swap.
        assert_eq!(model.log_channel("cxye", "cake"), f64::NEG_INFINITY);
        // Identical strings have no edit to classify.
        assert_eq!(model.log_channel("cake", "cake"), f64::NEG_INFINITY);
    }
}
