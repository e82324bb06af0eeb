//! # Word Vocabulary Builder
//!
//! Builds token vocabularies from monolingual text for sequence-model
//! training.
//!
//! A [`VocabularyStore`] holds tokens in a stable order, with reserved
//! special tokens pinned at the front. Corpora are tokenized line by line
//! with any ``FnMut(&str) -> impl IntoIterator`` and counted; the result is
//! pruned to the most frequent tokens, padded so that ``size + 1`` is a
//! multiple of a batching factor, and written in one of the
//! [`VocabFormat`]s.
//!
//! # Example
//!
//! ```rust,no_run
//! use wordvocab::tokenizers::whitespace_tokenize;
//! use wordvocab::vocab::specials::default_special_tokens;
//! use wordvocab::{VocabFormat, VocabularyStore};
//!
//! let mut vocab = VocabularyStore::new(default_special_tokens(true));
//! vocab.add_from_text("corpus.txt", whitespace_tokenize)?;
//!
//! let vocab = vocab
//!     .prune(50_000, 2)
//!     .pad_to_multiple(8, 1)?;
//!
//! vocab.serialize("vocab.txt", VocabFormat::Default)?;
//! # Ok::<(), wordvocab::VocabError>(())
//! ```
//!
//! [`VocabBuilderOptions`] wraps the same pipeline behind a single call.
#![warn(missing_docs, unused)]

pub mod builder;
pub mod errors;
pub mod tokenizers;
pub mod types;
pub mod validators;
pub mod vocab;

pub use builder::VocabBuilderOptions;
pub use errors::{Result, VocabError};
pub use vocab::{FrequencyTable, VocabFormat, VocabularyStore};
