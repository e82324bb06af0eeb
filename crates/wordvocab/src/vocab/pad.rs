//! # Vocabulary Size Padding

use crate::errors::Result;
use crate::validators;
use crate::vocab::store::VocabularyStore;

/// Name prefix of padding placeholder tokens.
pub const PLACEHOLDER_PREFIX: &str = "averyunlikelytoken";

/// The padded size for a vocabulary of `size` entries.
///
/// The smallest `target >= size + num_oov_buckets` such that `target + 1`
/// is divisible by `multiple`. The `+ 1` is the unknown token slot which
/// consumers add after loading.
pub fn padded_size(
    size: usize,
    multiple: usize,
    num_oov_buckets: usize,
) -> usize {
    let min_target = size + num_oov_buckets;
    if multiple <= 1 {
        return min_target;
    }
    match (min_target + 1) % multiple {
        0 => min_target,
        rem => min_target + (multiple - rem),
    }
}

/// Append placeholder tokens so the vocabulary reaches [`padded_size`].
///
/// Placeholders have frequency 0 and are named ``averyunlikelytoken{i}``,
/// skipping names already in the vocabulary.
///
/// # Errors
/// [`crate::errors::VocabError::Config`] if `multiple` or
/// `num_oov_buckets` is negative.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(store)))]
pub fn pad_to_multiple(
    store: &VocabularyStore,
    multiple: i64,
    num_oov_buckets: i64,
) -> Result<VocabularyStore> {
    let multiple = validators::try_size_multiple(multiple)? as usize;
    let num_oov_buckets = validators::try_num_oov_buckets(num_oov_buckets)? as usize;

    let target = padded_size(store.size(), multiple, num_oov_buckets);

    let mut table = store.table().clone();
    let mut i: usize = 0;
    while table.len() < target {
        let name = format!("{PLACEHOLDER_PREFIX}{i}");
        i += 1;
        if !table.contains(&name) {
            table.set(&name, 0);
        }
    }

    log::info!(
        "Padded vocabulary from {} to {} entries (size_multiple={multiple}, num_oov_buckets={num_oov_buckets})",
        store.size(),
        table.len()
    );
    Ok(VocabularyStore::from_parts(store.num_specials(), table))
}
