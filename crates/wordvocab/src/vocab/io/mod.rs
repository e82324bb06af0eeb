//! # Vocabulary IO
//!
//! Two line-oriented formats are supported, selected explicitly by
//! [`VocabFormat`]; formats are never sniffed from file contents.
//!
//! * [`VocabFormat::Default`] - ``token`` or ``token<TAB>count`` per line.
//! * [`VocabFormat::SentencePiece`] - ``token<TAB>score`` per line.
//!
//! Writers never reorder entries.

pub mod default_format;
pub mod sentencepiece;

use crate::errors::{Result, VocabError};
use crate::types::{Frequency, Token};
use crate::vocab::store::VocabularyStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Supported on-disk vocabulary formats.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VocabFormat {
    /// One token per line, optionally followed by ``<TAB>count``.
    #[default]
    Default,

    /// SentencePiece ``token<TAB>score`` vocabularies.
    SentencePiece,
}

impl VocabFormat {
    /// The format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::SentencePiece => "sentencepiece",
        }
    }
}

impl fmt::Display for VocabFormat {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VocabFormat {
    type Err = VocabError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(Self::Default),
            "sentencepiece" => Ok(Self::SentencePiece),
            _ => Err(VocabError::Format(s.to_string())),
        }
    }
}

/// Options for writing vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Write ``<TAB>count`` after regular tokens in the `default` format.
    pub with_frequencies: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            with_frequencies: true,
        }
    }
}

impl SerializeOptions {
    /// Set whether counts are written.
    pub fn with_frequencies(
        self,
        with_frequencies: bool,
    ) -> Self {
        Self { with_frequencies }
    }
}

/// One parsed vocabulary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEntry {
    /// The token.
    pub token: Token,

    /// The frequency; explicit, defaulted, or nominal.
    pub frequency: Frequency,

    /// Whether `frequency` was read as an explicit count.
    pub counted: bool,
}

/// Load vocabulary entries from a file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
/// * `format` - the declared format.
pub fn load_vocab_path<P: AsRef<Path>>(
    path: P,
    format: VocabFormat,
) -> Result<Vec<LoadedEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| VocabError::io_at(path, err))?;
    read_vocab(BufReader::new(file), format).map_err(|err| err.with_path(path))
}

/// Read vocabulary entries from a [`BufRead`] stream.
///
/// Later duplicates of a token are skipped with a warning.
pub fn read_vocab<R: BufRead>(
    reader: R,
    format: VocabFormat,
) -> Result<Vec<LoadedEntry>> {
    match format {
        VocabFormat::Default => default_format::read_entries(reader),
        VocabFormat::SentencePiece => sentencepiece::read_entries(reader),
    }
}

/// Save a [`VocabularyStore`] to a file.
///
/// The vocabulary is written to a temporary sibling file which is renamed
/// into place; on failure no file is left at `path`.
pub fn save_vocab_path<P: AsRef<Path>>(
    store: &VocabularyStore,
    path: P,
    format: VocabFormat,
    options: SerializeOptions,
) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = temporary_sibling(path);

    let written = File::create(&tmp_path)
        .map_err(VocabError::io)
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write_vocab(store, format, options, &mut writer)?;
            writer.flush().map_err(VocabError::io)
        })
        .and_then(|()| std::fs::rename(&tmp_path, path).map_err(VocabError::io));

    if let Err(err) = written {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(err.with_path(path));
    }

    log::info!(
        "Saved {} tokens to {} ({format})",
        store.size(),
        path.display()
    );
    Ok(())
}

/// Write a [`VocabularyStore`] to a [`Write`] writer.
pub fn write_vocab<W: Write>(
    store: &VocabularyStore,
    format: VocabFormat,
    options: SerializeOptions,
    writer: &mut W,
) -> Result<()> {
    match format {
        VocabFormat::Default => default_format::write_entries(store, options, writer),
        VocabFormat::SentencePiece => sentencepiece::write_entries(store, writer),
    }
}

/// Characters which would split or end a vocabulary line.
const LINE_BREAKING: [char; 3] = ['\t', '\n', '\r'];

/// Reject tokens that would not read back unchanged.
pub(crate) fn check_writable(
    token: &str,
    index: usize,
    format: VocabFormat,
) -> Result<()> {
    if token.is_empty() || token.contains(&LINE_BREAKING[..]) {
        return Err(VocabError::Unwritable {
            token: token.to_string(),
            index,
            format: format.name(),
        });
    }
    Ok(())
}

/// Skip tokens already seen in the same file.
pub(crate) fn push_unique(
    entries: &mut Vec<LoadedEntry>,
    seen: &mut ahash::AHashSet<Token>,
    entry: LoadedEntry,
    line: usize,
) {
    if seen.contains(&entry.token) {
        log::warn!(
            "Duplicate token {:?} in vocabulary at line {line}",
            entry.token
        );
        return;
    }
    seen.insert(entry.token.clone());
    entries.push(entry);
}

fn temporary_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
