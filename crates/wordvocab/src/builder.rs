//! # Vocabulary Builder
//!
//! The end-to-end pipeline: seed → accumulate → prune → pad → serialize.

use crate::errors::{Result, VocabError};
use crate::validators;
use crate::vocab::io::{self, SerializeOptions, VocabFormat};
use crate::vocab::specials::default_special_tokens;
use crate::vocab::store::VocabularyStore;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options for [`VocabBuilderOptions::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabBuilderOptions {
    /// Reserved tokens, pinned in order at the front of the vocabulary.
    pub special_tokens: Vec<String>,

    /// Optional saved vocabulary to continue building from.
    pub from_vocab: Option<PathBuf>,

    /// The format of `from_vocab`.
    pub from_format: VocabFormat,

    /// The output format.
    pub save_format: VocabFormat,

    /// Minimum token frequency; `<= 1` disables the floor.
    pub min_frequency: i64,

    /// Maximum vocabulary size; `<= 0` disables the cap.
    pub max_size: i64,

    /// Pad so that ``size + 1`` is a multiple of this value.
    pub size_multiple: i64,

    /// Placeholder slots always reserved by padding.
    pub num_oov_buckets: i64,

    /// Write counts in the `default` format.
    pub with_frequencies: bool,
}

impl Default for VocabBuilderOptions {
    fn default() -> Self {
        Self {
            special_tokens: default_special_tokens(true),
            from_vocab: None,
            from_format: VocabFormat::Default,
            save_format: VocabFormat::Default,
            min_frequency: 1,
            max_size: 0,
            size_multiple: 1,
            num_oov_buckets: 1,
            with_frequencies: true,
        }
    }
}

impl VocabBuilderOptions {
    /// Set the special tokens.
    pub fn with_special_tokens<I, S>(
        self,
        special_tokens: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            special_tokens: special_tokens.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Set the seed vocabulary and its format.
    pub fn with_from_vocab<P: Into<PathBuf>>(
        self,
        path: Option<P>,
        format: VocabFormat,
    ) -> Self {
        Self {
            from_vocab: path.map(Into::into),
            from_format: format,
            ..self
        }
    }

    /// Set the output format.
    pub fn with_save_format(
        self,
        save_format: VocabFormat,
    ) -> Self {
        Self {
            save_format,
            ..self
        }
    }

    /// Set the minimum frequency.
    pub fn with_min_frequency(
        self,
        min_frequency: i64,
    ) -> Self {
        Self {
            min_frequency,
            ..self
        }
    }

    /// Set the maximum size.
    pub fn with_max_size(
        self,
        max_size: i64,
    ) -> Self {
        Self { max_size, ..self }
    }

    /// Set the size multiple.
    pub fn with_size_multiple(
        self,
        size_multiple: i64,
    ) -> Self {
        Self {
            size_multiple,
            ..self
        }
    }

    /// Set the number of OOV buckets.
    pub fn with_num_oov_buckets(
        self,
        num_oov_buckets: i64,
    ) -> Self {
        Self {
            num_oov_buckets,
            ..self
        }
    }

    /// Set whether counts are written.
    pub fn with_frequencies(
        self,
        with_frequencies: bool,
    ) -> Self {
        Self {
            with_frequencies,
            ..self
        }
    }

    /// Check numeric configuration.
    pub fn validate(&self) -> Result<()> {
        validators::try_size_multiple(self.size_multiple)?;
        validators::try_num_oov_buckets(self.num_oov_buckets)?;
        Ok(())
    }

    /// Build a vocabulary from corpus files.
    ///
    /// Files are consumed in order; discovery order (and with it the
    /// pruning tie-break) runs line by line, first file to last.
    pub fn build<P, F, I, S>(
        &self,
        data: &[P],
        tokenize: F,
    ) -> Result<VocabularyStore>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> I,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenize = tokenize;
        self.try_build(data, |line: &str| Ok::<_, VocabError>(tokenize(line)))
    }

    /// Build a vocabulary with a fallible tokenizer.
    ///
    /// The first tokenizer error aborts the build.
    pub fn try_build<P, F, I, S>(
        &self,
        data: &[P],
        tokenize: F,
    ) -> Result<VocabularyStore>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> Result<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.validate()?;

        let mut store = VocabularyStore::new(&self.special_tokens);
        if let Some(path) = &self.from_vocab {
            store.load(path, self.from_format)?;
        }

        let mut tokenize = tokenize;
        for path in data {
            store.try_add_from_text(path, &mut tokenize)?;
        }
        log::info!(
            "Collected {} tokens from {} files",
            store.size(),
            data.len()
        );

        let store = store.prune(self.max_size, self.min_frequency);
        store.pad_to_multiple(self.size_multiple, self.num_oov_buckets)
    }

    /// Build a vocabulary and save it to `save_path`.
    ///
    /// Nothing is written unless the whole build succeeds.
    pub fn build_and_save<P, F, I, S, Q>(
        &self,
        data: &[P],
        tokenize: F,
        save_path: Q,
    ) -> Result<VocabularyStore>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> I,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        Q: AsRef<Path>,
    {
        let mut tokenize = tokenize;
        self.try_build_and_save(
            data,
            |line: &str| Ok::<_, VocabError>(tokenize(line)),
            save_path,
        )
    }

    /// Build a vocabulary with a fallible tokenizer and save it to `save_path`.
    pub fn try_build_and_save<P, F, I, S, Q>(
        &self,
        data: &[P],
        tokenize: F,
        save_path: Q,
    ) -> Result<VocabularyStore>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> Result<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        Q: AsRef<Path>,
    {
        let store = self.try_build(data, tokenize)?;
        io::save_vocab_path(
            &store,
            save_path,
            self.save_format,
            SerializeOptions::default().with_frequencies(self.with_frequencies),
        )?;
        Ok(store)
    }
}
