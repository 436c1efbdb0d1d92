use crate::{SpellingError, SpellingErrorGroup};
use std::collections::BTreeMap;

/// Result of grouping the raw suspects of one scan.
#[derive(Debug, Clone, Default)]
pub struct Consolidation {
    /// Suspects fed in, before filtering.
    pub total_suspects: usize,
    /// Distinct words dropped for recurring fewer than `threshold` times.
    pub dropped_words: usize,
    /// Surviving groups, ordered by lowercase word.
    pub groups: Vec<SpellingErrorGroup>,
}

/// Group suspects by lowercase word and drop words seen fewer than
/// `threshold` times.
///
/// Members keep their input order. Needs the whole error set in memory.
pub fn consolidate(errors: Vec<SpellingError>, threshold: usize) -> Consolidation {
    let total_suspects = errors.len();
    let mut by_word: BTreeMap<String, Vec<SpellingError>> = BTreeMap::new();

    for error in errors {
        by_word
            .entry(error.word().to_lowercase())
            .or_default()
            .push(error);
    }

    let distinct = by_word.len();
    let groups: Vec<SpellingErrorGroup> = by_word
        .into_iter()
        .filter(|(_, occurrences)| occurrences.len() >= threshold)
        .map(|(word, occurrences)| SpellingErrorGroup::new(word, occurrences))
        .collect();

    log::debug!(
        "{} suspects in {} distinct words, {} kept",
        total_suspects,
        distinct,
        groups.len()
    );

    Consolidation {
        total_suspects,
        dropped_words: distinct - groups.len(),
        groups,
    }
}
