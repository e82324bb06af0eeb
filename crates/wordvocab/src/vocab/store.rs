//! # Vocabulary Store
//!
//! An ordered token vocabulary with reserved special tokens pinned at the
//! front. Indices are positional: entry `i` of the ordering has index `i`.

use crate::errors::{Result, VocabError};
use crate::types::{Frequency, SPECIAL_FREQUENCY, Token};
use crate::vocab::frequency_table::FrequencyTable;
use crate::vocab::io::{self, LoadedEntry, SerializeOptions, VocabFormat};
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A borrowed view of one vocabulary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VocabularyEntry<'a> {
    /// The token.
    pub token: &'a str,

    /// The token frequency; [`SPECIAL_FREQUENCY`] for special tokens.
    pub frequency: Frequency,

    /// The positional index.
    pub index: usize,
}

/// Ordered vocabulary; special tokens occupy indices ``0..num_specials``.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyStore {
    /// The number of leading special tokens.
    num_specials: usize,

    /// Frequencies, in index order.
    table: FrequencyTable,
}

/// Unchecked serialized form of a [`VocabularyStore`].
#[derive(Deserialize)]
struct StoreParts {
    num_specials: usize,
    table: FrequencyTable,
}

impl<'de> Deserialize<'de> for VocabularyStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parts = StoreParts::deserialize(deserializer)?;
        Self::try_from_parts(parts.num_specials, parts.table).map_err(de::Error::custom)
    }
}

impl VocabularyStore {
    /// Create a store holding only the given special tokens, in order.
    ///
    /// Repeated special tokens keep their first position.
    pub fn new<I, S>(special_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = FrequencyTable::new();
        for token in special_tokens {
            let token = token.as_ref();
            if table.contains(token) {
                log::warn!("Duplicate special token {token:?} ignored");
                continue;
            }
            table.set(token, SPECIAL_FREQUENCY);
        }
        Self {
            num_specials: table.len(),
            table,
        }
    }

    /// Create a store from special tokens, seeded from a saved vocabulary.
    pub fn from_file<I, S, P>(
        special_tokens: I,
        path: P,
        format: VocabFormat,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut store = Self::new(special_tokens);
        store.load(path, format)?;
        Ok(store)
    }

    /// Assemble a store from its parts.
    ///
    /// The first `num_specials` entries of `table` are the special tokens.
    pub(crate) fn from_parts(
        num_specials: usize,
        table: FrequencyTable,
    ) -> Self {
        debug_assert!(num_specials <= table.len());
        Self {
            num_specials,
            table,
        }
    }

    /// Assemble a store from untrusted parts.
    ///
    /// # Errors
    /// [`VocabError::Config`] if `num_specials` exceeds the table size.
    pub fn try_from_parts(
        num_specials: usize,
        table: FrequencyTable,
    ) -> Result<Self> {
        if num_specials > table.len() {
            return Err(VocabError::Config(format!(
                "num_specials ({num_specials}) exceeds the table size ({})",
                table.len()
            )));
        }
        Ok(Self::from_parts(num_specials, table))
    }

    /// The current number of entries, specials included.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the store has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The number of leading special tokens.
    pub fn num_specials(&self) -> usize {
        self.num_specials
    }

    /// Returns `true` if `index` holds a special token.
    pub fn is_special(
        &self,
        index: usize,
    ) -> bool {
        index < self.num_specials
    }

    /// Returns `true` if the token is in the vocabulary.
    pub fn contains(
        &self,
        token: &str,
    ) -> bool {
        self.table.contains(token)
    }

    /// The frequency table backing this store, in index order.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// The frequency of a token; `0` if absent.
    pub fn frequency(
        &self,
        token: &str,
    ) -> Frequency {
        self.table.count(token)
    }

    /// The index of a token, if present.
    pub fn lookup_index(
        &self,
        token: &str,
    ) -> Option<usize> {
        self.table.position(token)
    }

    /// The token at an index, if any.
    pub fn lookup_token(
        &self,
        index: usize,
    ) -> Option<&str> {
        self.table.get(index).map(|(token, _)| token)
    }

    /// Snapshot of all tokens in index order.
    pub fn tokens(&self) -> Vec<Token> {
        self.table.iter().map(|(token, _)| Token::from(token)).collect()
    }

    /// Iterate over entries in index order.
    pub fn entries(&self) -> impl Iterator<Item = VocabularyEntry<'_>> {
        self.table
            .iter()
            .enumerate()
            .map(|(index, (token, frequency))| VocabularyEntry {
                token,
                frequency,
                index,
            })
    }

    /// Count one occurrence of `token`, appending it if unseen.
    pub fn add(
        &mut self,
        token: &str,
    ) {
        self.table.increment(token);
    }

    /// Merge a saved vocabulary from a file into this store.
    ///
    /// The whole file is parsed before the store is touched; on error the
    /// store is unchanged.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(path = %path.as_ref().display()))
    )]
    pub fn load<P: AsRef<Path>>(
        &mut self,
        path: P,
        format: VocabFormat,
    ) -> Result<()> {
        let entries = io::load_vocab_path(&path, format)?;
        log::info!(
            "Loaded {} tokens from {} ({format})",
            entries.len(),
            path.as_ref().display()
        );
        self.merge_loaded(entries);
        Ok(())
    }

    /// Merge a saved vocabulary from a reader into this store.
    pub fn load_reader<R: BufRead>(
        &mut self,
        reader: R,
        format: VocabFormat,
    ) -> Result<()> {
        let entries = io::read_vocab(reader, format)?;
        self.merge_loaded(entries);
        Ok(())
    }

    /// Merge parsed entries.
    ///
    /// Unseen tokens are appended with their loaded frequency. Known tokens
    /// keep their position; an explicit loaded count overwrites theirs,
    /// except on special tokens.
    pub fn merge_loaded<I>(
        &mut self,
        entries: I,
    ) where
        I: IntoIterator<Item = LoadedEntry>,
    {
        for entry in entries {
            match self.table.position(&entry.token) {
                None => {
                    self.table.set(&entry.token, entry.frequency);
                }
                Some(index) => {
                    if entry.counted && !self.is_special(index) {
                        self.table.set(&entry.token, entry.frequency);
                    }
                }
            }
        }
    }

    /// Accumulate token counts from a text file, one line at a time.
    ///
    /// Calling this twice with the same file doubles the counts.
    pub fn add_from_text<P, F, I, S>(
        &mut self,
        path: P,
        tokenize: F,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> I,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenize = tokenize;
        self.try_add_from_text(path, |line: &str| Ok::<_, VocabError>(tokenize(line)))
    }

    /// Accumulate token counts from a text file with a fallible tokenizer.
    ///
    /// A tokenizer error aborts the file with [`VocabError::Tokenize`],
    /// located at the failing line. Counts from earlier lines are kept.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip_all, fields(path = %path.as_ref().display()))
    )]
    pub fn try_add_from_text<P, F, I, S>(
        &mut self,
        path: P,
        tokenize: F,
    ) -> Result<()>
    where
        P: AsRef<Path>,
        F: FnMut(&str) -> Result<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| VocabError::io_at(path, err))?;

        let before = self.size();
        self.try_add_from_reader(BufReader::new(file), tokenize)
            .map_err(|err| err.with_path(path))?;

        log::debug!(
            "{}: {} new tokens, {} total",
            path.display(),
            self.size() - before,
            self.size()
        );
        Ok(())
    }

    /// Accumulate token counts from a line reader.
    ///
    /// Line terminators (``\n`` or ``\r\n``) are stripped before tokenizing.
    pub fn add_from_reader<R, F, I, S>(
        &mut self,
        reader: R,
        tokenize: F,
    ) -> Result<()>
    where
        R: BufRead,
        F: FnMut(&str) -> I,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenize = tokenize;
        self.try_add_from_reader(reader, |line: &str| Ok::<_, VocabError>(tokenize(line)))
    }

    /// Accumulate token counts from a line reader with a fallible tokenizer.
    pub fn try_add_from_reader<R, F, I, S>(
        &mut self,
        reader: R,
        tokenize: F,
    ) -> Result<()>
    where
        R: BufRead,
        F: FnMut(&str) -> Result<I>,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenize = tokenize;
        for (i, line) in reader.lines().enumerate() {
            let line = line.map_err(VocabError::io)?;
            let tokens = tokenize(&line).map_err(|err| err.at_line(i + 1))?;
            for token in tokens {
                self.table.increment(token.as_ref());
            }
        }
        Ok(())
    }

    /// Accumulate token counts from in-memory lines.
    pub fn add_from_lines<L, T, F, I, S>(
        &mut self,
        lines: L,
        tokenize: F,
    ) where
        L: IntoIterator<Item = T>,
        T: AsRef<str>,
        F: FnMut(&str) -> I,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenize = tokenize;
        for line in lines {
            for token in tokenize(line.as_ref()) {
                self.table.increment(token.as_ref());
            }
        }
    }

    /// Reduce the store; see [`crate::vocab::prune::prune`].
    pub fn prune(
        &self,
        max_size: i64,
        min_frequency: i64,
    ) -> VocabularyStore {
        crate::vocab::prune::prune(self, max_size, min_frequency)
    }

    /// Pad the store; see [`crate::vocab::pad::pad_to_multiple`].
    pub fn pad_to_multiple(
        &self,
        multiple: i64,
        num_oov_buckets: i64,
    ) -> Result<VocabularyStore> {
        crate::vocab::pad::pad_to_multiple(self, multiple, num_oov_buckets)
    }

    /// Write the store to `path` in the given format.
    pub fn serialize<P: AsRef<Path>>(
        &self,
        path: P,
        format: VocabFormat,
    ) -> Result<()> {
        io::save_vocab_path(self, path, format, SerializeOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::whitespace_tokenize;
    use crate::vocab::specials::default_special_tokens;
    use std::io::Cursor;

    #[test]
    fn test_new_specials() {
        let store = VocabularyStore::new(default_special_tokens(true));
        assert_eq!(store.size(), 3);
        assert_eq!(store.num_specials(), 3);
        assert_eq!(store.tokens(), vec!["<blank>", "<s>", "</s>"]);
        assert_eq!(store.frequency("<s>"), SPECIAL_FREQUENCY);
        assert!(store.is_special(2));
        assert!(!store.is_special(3));

        let store = VocabularyStore::new(["<pad>", "<s>", "<pad>"]);
        assert_eq!(store.tokens(), vec!["<pad>", "<s>"]);
        assert_eq!(store.num_specials(), 2);
    }

    #[test]
    fn test_add_from_lines() {
        let mut store = VocabularyStore::new(["<pad>"]);
        store.add_from_lines(["a b a", "b c"], whitespace_tokenize);

        assert_eq!(store.tokens(), vec!["<pad>", "a", "b", "c"]);
        assert_eq!(store.frequency("a"), 2);
        assert_eq!(store.frequency("b"), 2);
        assert_eq!(store.frequency("c"), 1);
        assert_eq!(store.lookup_index("c"), Some(3));
        assert_eq!(store.lookup_token(1), Some("a"));
        assert_eq!(store.lookup_token(9), None);
    }

    #[test]
    fn test_add_from_reader_strips_crlf() {
        let mut store = VocabularyStore::new(["<pad>"]);
        let reader = Cursor::new("x y\r\ny\r\n");
        store
            .add_from_reader(reader, |line: &str| vec![line.to_string()])
            .unwrap();

        assert_eq!(store.tokens(), vec!["<pad>", "x y", "y"]);
    }

    #[test]
    fn test_special_tokens_in_text_keep_sentinel() {
        let mut store = VocabularyStore::new(["<pad>", "<s>"]);
        store.add_from_lines(["<s> a <s>"], whitespace_tokenize);

        assert_eq!(store.tokens(), vec!["<pad>", "<s>", "a"]);
        assert_eq!(store.frequency("<s>"), SPECIAL_FREQUENCY);
    }

    #[test]
    fn test_entries() {
        let mut store = VocabularyStore::new(["<pad>"]);
        store.add("w");
        store.add("w");

        let entries: Vec<VocabularyEntry> = store.entries().collect();
        assert_eq!(
            entries,
            vec![
                VocabularyEntry {
                    token: "<pad>",
                    frequency: SPECIAL_FREQUENCY,
                    index: 0,
                },
                VocabularyEntry {
                    token: "w",
                    frequency: 2,
                    index: 1,
                },
            ]
        );
    }

    #[test]
    fn test_load_reader_merge() {
        let mut store = VocabularyStore::new(["<blank>"]);
        store.add_from_lines(["b a b"], whitespace_tokenize);

        store
            .load_reader(
                Cursor::new("<blank>\na\t7\nc\t3\nd\n"),
                VocabFormat::Default,
            )
            .unwrap();

        assert_eq!(store.tokens(), vec!["<blank>", "b", "a", "c", "d"]);
        assert_eq!(store.frequency("<blank>"), SPECIAL_FREQUENCY);
        assert_eq!(store.frequency("b"), 2);
        assert_eq!(store.frequency("a"), 7);
        assert_eq!(store.frequency("c"), 3);
        assert_eq!(store.frequency("d"), 1);
    }

    #[test]
    fn test_load_reader_bare_token_keeps_count() {
        let mut store = VocabularyStore::new(["<blank>"]);
        store.add_from_lines(["a a a"], whitespace_tokenize);

        store
            .load_reader(Cursor::new("a\n"), VocabFormat::Default)
            .unwrap();
        assert_eq!(store.frequency("a"), 3);
    }

    #[test]
    fn test_load_corrupt_leaves_store_unchanged() {
        let mut store = VocabularyStore::new(["<blank>"]);
        store.add("a");
        let before = store.clone();

        let err = store
            .load_reader(Cursor::new("b\t2\nc\tmany\n"), VocabFormat::Default)
            .unwrap_err();

        assert!(matches!(err, VocabError::CorruptInput { line: 2, .. }));
        assert_eq!(store, before);
    }

    #[test]
    fn test_try_add_from_reader_locates_error() {
        let mut store = VocabularyStore::new(["<pad>"]);
        let err = store
            .try_add_from_reader(Cursor::new("a b\nc !\nd\n"), |line: &str| {
                if line.contains('!') {
                    return Err(VocabError::tokenize("no bangs"));
                }
                Ok(whitespace_tokenize(line))
            })
            .unwrap_err();

        match err {
            VocabError::Tokenize { line, message, .. } => {
                assert_eq!(line, 2);
                assert_eq!(message, "no bangs");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(store.tokens(), vec!["<pad>", "a", "b"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut store = VocabularyStore::new(["<pad>", "<s>"]);
        store.add_from_lines(["a b a"], whitespace_tokenize);

        let json = serde_json::to_string(&store).unwrap();
        let loaded: VocabularyStore = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, store);
        assert_eq!(loaded.num_specials(), 2);
    }

    #[test]
    fn test_deserialize_rejects_specials_past_end() {
        let json = r#"{"num_specials":3,"table":[["<pad>",18446744073709551615],["a",2]]}"#;
        let err = serde_json::from_str::<VocabularyStore>(json).unwrap_err();
        assert!(err.to_string().contains("num_specials (3) exceeds the table size (2)"));

        let table = FrequencyTable::from(vec![(Token::from("<pad>"), SPECIAL_FREQUENCY)]);
        assert!(VocabularyStore::try_from_parts(1, table.clone()).is_ok());
        assert!(matches!(
            VocabularyStore::try_from_parts(2, table),
            Err(VocabError::Config(_))
        ));
    }

    #[test]
    fn test_add_from_text_missing_file() {
        let mut store = VocabularyStore::new(["<blank>"]);
        let err = store
            .add_from_text("/nonexistent/corpus.txt", whitespace_tokenize)
            .unwrap_err();
        assert!(matches!(err, VocabError::Io { .. }));
        assert_eq!(store.size(), 1);
    }
}
