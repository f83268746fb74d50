// src/core/corrector.rs
use crate::core::candidates::CandidateGenerator;
use crate::core::channel::ChannelModel;
use crate::core::prior::PriorModel;
use crate::core::stats::StatisticsStore;
use crate::loader::{self, DataLoadError, TableSources};
use crate::persistence;
use log::debug;
use std::path::Path;
use std::sync::Arc;

/// The corrector engine is composed of the candidate generator and the two
/// probability models, all reading from one shared statistics store.
pub struct Corrector {
    stats: Arc<StatisticsStore>,
    candidates: CandidateGenerator,
    channel: ChannelModel,
    prior: PriorModel,
}

impl Corrector {
    pub fn new(stats: StatisticsStore) -> Self {
        let stats = Arc::new(stats);
        Self {
            candidates: CandidateGenerator::new(Arc::clone(&stats)),
            channel: ChannelModel::new(Arc::clone(&stats)),
            prior: PriorModel::new(Arc::clone(&stats)),
            stats,
        }
    }

    /// Builds the engine from the six statistics sources on disk.
    pub fn from_tables(sources: &TableSources) -> Result<Self, DataLoadError> {
        Ok(Self::new(loader::load_statistics(sources)?))
    }

    /// Builds the engine from a compiled statistics artifact.
    pub fn from_compiled(path: &Path) -> Result<Self, DataLoadError> {
        Ok(Self::new(persistence::load_from_disk(path)?))
    }

    /// Writes the engine's statistics store as a compiled artifact.
    pub fn save_compiled(&self, path: &Path) -> Result<(), std::io::Error> {
        persistence::save_to_disk(&self.stats, path)
    }

    pub fn statistics(&self) -> &StatisticsStore {
        &self.stats
    }

    /// The most probable correction for a single word.
    ///
    /// A word already in the vocabulary comes back in its lowercased form.
    /// A word with no distance-1 vocabulary neighbor comes back exactly as
    /// given. Otherwise each candidate is scored `log_prior + log_channel`
    /// and the maximum wins; equal scores resolve to the lexicographically
    /// smallest candidate, so repeated calls always agree.
    pub fn correct(&self, original_word: &str) -> String {
        let word = original_word.to_lowercase();

        if self.stats.contains(&word) {
            return word;
        }

        let candidates = self.candidates.candidates(&word);
        if candidates.is_empty() {
            return original_word.to_string();
        }
        debug!("{} candidate(s) for '{}'", candidates.len(), word);

        let mut best: Option<(String, f64)> = None;
        for candidate in candidates {
            let score = self.prior.log_prior(&candidate)
                + self.channel.log_channel(&word, &candidate);
            debug!("  {candidate}: {score:.4}");
            // Candidates arrive in lexicographic order; a strictly-greater
            // comparison keeps the smallest among score ties.
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }

        match best {
            Some((winner, _)) => winner,
            None => original_word.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CountTable;
    use std::collections::HashMap;

    fn corrector() -> Corrector {
        let unigrams = [
            ('s', 40),
            ('p', 20),
            ('e', 50),
            ('l', 30),
            ('i', 25),
            ('n', 25),
            ('g', 20),
            ('h', 15),
            ('a', 45),
            ('y', 10),
            ('c', 20),
            ('k', 10),
        ]
        .into_iter()
        .collect();
        let bigrams = [(('a', 'p'), 9), (('l', 'l'), 11), (('k', 'e'), 7)]
            .into_iter()
            .collect();
        let substitutions = [(('a', 'e'), 5)].into_iter().collect();
        let deletions = [(('l', 'l'), 8), (('a', 'p'), 6), (('k', 'e'), 4)]
            .into_iter()
            .collect();
        let insertions = [(('a', 'a'), 2)].into_iter().collect();
        let vocabulary = HashMap::from([
            ("spelling".to_string(), 120),
            ("happy".to_string(), 90),
            ("peace".to_string(), 80),
            ("cake".to_string(), 60),
        ]);
        Corrector::new(StatisticsStore::new(
            unigrams,
            bigrams,
            substitutions,
            deletions,
            insertions,
            vocabulary,
        ))
    }

    #[test]
    fn known_words_come_back_unchanged() {
        let corrector = corrector();
        for word in ["spelling", "happy", "peace", "cake"] {
            assert_eq!(corrector.correct(word), word);
        }
    }

    #[test]
    fn known_words_are_lowercased() {
        let corrector = corrector();
        assert_eq!(corrector.correct("Peace"), "peace");
    }

    #[test]
    fn single_insertion_typo_is_corrected() {
        let corrector = corrector();
        assert_eq!(corrector.correct("speling"), "spelling");
    }

    #[test]
    fn single_deletion_typo_is_corrected() {
        let corrector = corrector();
        assert_eq!(corrector.correct("hapy"), "happy");
        assert_eq!(corrector.correct("cak"), "cake");
    }

    #[test]
    fn no_neighbor_preserves_the_input_exactly() {
        let corrector = corrector();
        assert_eq!(corrector.correct("zzxyy"), "zzxyy");
        assert_eq!(corrector.correct("Zzxyy"), "Zzxyy");
        // Edit distance 2 from "spelling".
        assert_eq!(corrector.correct("sping"), "sping");
    }

    #[test]
    fn never_panics_on_odd_input() {
        let corrector = corrector();
        assert_eq!(corrector.correct(""), "");
        assert_eq!(corrector.correct("1234"), "1234");
        assert_eq!(corrector.correct("\u{30ab}\u{30ad}"), "\u{30ab}\u{30ad}");
    }

    #[test]
    fn equal_scores_resolve_lexicographically() {
        // Two candidates that are perfectly symmetric for the typo "bat":
        // same frequency, same substitution position, identical context
        // counts, so prior and channel scores match exactly.
        let unigrams = [('i', 5), ('o', 5)].into_iter().collect();
        let vocabulary =
            HashMap::from([("bit".to_string(), 10), ("bot".to_string(), 10)]);
        let corrector = Corrector::new(StatisticsStore::new(
            unigrams,
            CountTable::new(),
            CountTable::new(),
            CountTable::new(),
            CountTable::new(),
            vocabulary,
        ));
        assert_eq!(corrector.correct("bat"), "bit");
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let corrector = corrector();
        let first = corrector.correct("speling");
        for _ in 0..10 {
            assert_eq!(corrector.correct("speling"), first);
        }
    }
}
