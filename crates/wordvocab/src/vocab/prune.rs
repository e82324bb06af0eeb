//! # Vocabulary Pruning

use crate::types::Frequency;
use crate::vocab::frequency_table::FrequencyTable;
use crate::vocab::store::VocabularyStore;
use core::cmp::Reverse;

/// Reduce a vocabulary to its most frequent tokens.
///
/// Special tokens are always kept, in order, at the front. Regular tokens:
/// 1. are dropped if their frequency is below `min_frequency`;
/// 2. are stably sorted by descending frequency, so ties keep
///    first-discovery order;
/// 3. are truncated so the result holds at most `max_size` entries
///    (specials included).
///
/// # Arguments
/// * `max_size` - the size cap; `<= 0` means unlimited.
/// * `min_frequency` - the frequency floor; `<= 1` means unlimited.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(store)))]
pub fn prune(
    store: &VocabularyStore,
    max_size: i64,
    min_frequency: i64,
) -> VocabularyStore {
    let num_specials = store.num_specials();
    let table = store.table();

    let mut regular: Vec<(&str, Frequency)> = table.iter().skip(num_specials).collect();

    if min_frequency > 1 {
        let floor = min_frequency as Frequency;
        regular.retain(|&(_, count)| count >= floor);
    }

    regular.sort_by_key(|&(_, count)| Reverse(count));

    if max_size > 0 {
        let keep = (max_size as usize).saturating_sub(num_specials);
        regular.truncate(keep);
    }

    let mut pruned = FrequencyTable::new();
    for (token, count) in table.iter().take(num_specials).chain(regular) {
        pruned.set(token, count);
    }

    log::info!(
        "Pruned vocabulary from {} to {} entries (max_size={max_size}, min_frequency={min_frequency})",
        store.size(),
        pruned.len()
    );
    VocabularyStore::from_parts(num_specials, pruned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::whitespace_tokenize;
    use crate::types::SPECIAL_FREQUENCY;

    fn scenario_store() -> VocabularyStore {
        let mut store = VocabularyStore::new(["<pad>"]);
        store.add_from_lines(["a b a", "b c"], whitespace_tokenize);
        store
    }

    #[test]
    fn test_prune_size_cap() {
        let pruned = prune(&scenario_store(), 3, 1);
        assert_eq!(pruned.tokens(), vec!["<pad>", "a", "b"]);
        assert_eq!(pruned.frequency("a"), 2);
        assert_eq!(pruned.frequency("<pad>"), SPECIAL_FREQUENCY);
        assert_eq!(pruned.num_specials(), 1);
    }

    #[test]
    fn test_prune_unlimited() {
        let store = scenario_store();
        for (max_size, min_frequency) in [(0, 1), (-1, 0), (0, -5)] {
            let pruned = prune(&store, max_size, min_frequency);
            assert_eq!(pruned, store);
        }
    }

    #[test]
    fn test_prune_sorts_by_frequency() {
        let mut store = VocabularyStore::new(["<pad>", "<s>"]);
        store.add_from_lines(["x y z z y z w"], whitespace_tokenize);

        let pruned = store.prune(0, 1);
        assert_eq!(pruned.tokens(), vec!["<pad>", "<s>", "z", "y", "x", "w"]);
        assert_eq!(pruned.lookup_index("z"), Some(2));
    }

    #[test]
    fn test_prune_min_frequency() {
        let pruned = prune(&scenario_store(), 0, 2);
        assert_eq!(pruned.tokens(), vec!["<pad>", "a", "b"]);

        let pruned = prune(&scenario_store(), 0, 100);
        assert_eq!(pruned.tokens(), vec!["<pad>"]);
    }

    #[test]
    fn test_prune_combined() {
        let mut store = VocabularyStore::new(["<pad>"]);
        store.add_from_lines(["c a b a b c c d"], whitespace_tokenize);

        // c:3 a:2 b:2 d:1; the floor drops d, the cap then drops b.
        let pruned = prune(&store, 3, 2);
        assert_eq!(pruned.tokens(), vec!["<pad>", "c", "a"]);
    }

    #[test]
    fn test_prune_cap_below_specials() {
        let mut store = VocabularyStore::new(["<blank>", "<s>", "</s>"]);
        store.add_from_lines(["a b"], whitespace_tokenize);

        let pruned = prune(&store, 2, 1);
        assert_eq!(pruned.tokens(), vec!["<blank>", "<s>", "</s>"]);
    }

    #[test]
    fn test_prune_deterministic() {
        let mut store = VocabularyStore::new(["<pad>"]);
        let lines: Vec<String> = (0..50)
            .map(|i| format!("t{} t{} t{}", i % 7, i % 11, i % 13))
            .collect();
        store.add_from_lines(&lines, whitespace_tokenize);

        let first = prune(&store, 10, 1);
        let second = prune(&store, 10, 1);
        assert_eq!(first.tokens(), second.tokens());
        assert_eq!(first.size(), 10);
    }

    #[test]
    fn test_prune_keeps_zero_frequency_without_floor() {
        let store = scenario_store().pad_to_multiple(8, 1).unwrap();
        let pruned = prune(&store, 0, 1);
        assert_eq!(pruned.size(), store.size());
    }
}
