//! # Vocabulary

pub mod frequency_table;
pub mod io;
pub mod pad;
pub mod prune;
pub mod specials;
pub mod store;

pub use frequency_table::FrequencyTable;
pub use io::{SerializeOptions, VocabFormat};
pub use pad::pad_to_multiple;
pub use prune::prune;
pub use store::{VocabularyEntry, VocabularyStore};
