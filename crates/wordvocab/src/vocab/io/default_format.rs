//! # Default Vocabulary Format
//!
//! One token per line, in index order. Regular entries may be followed by a
//! tab and their count; special tokens are always written bare.
//!
//! ```text
//! <blank>
//! <s>
//! </s>
//! the	1042
//! cat	17
//! ```

use crate::errors::{Result, VocabError};
use crate::types::{Frequency, Token};
use crate::vocab::io::{LoadedEntry, SerializeOptions, VocabFormat, check_writable, push_unique};
use crate::vocab::store::VocabularyStore;
use ahash::AHashSet;
use std::io::{BufRead, Write};

/// Separator between a token and its count.
pub const SEPARATOR: char = '\t';

/// Parse one line into ``(token, count)``.
///
/// The count column is split on the last separator; a bare token has no count.
pub fn parse_line(line: &str) -> std::result::Result<(&str, Option<Frequency>), String> {
    let (token, count) = match line.rsplit_once(SEPARATOR) {
        Some((token, count)) => {
            let count = count
                .parse::<Frequency>()
                .map_err(|_| format!("invalid frequency {count:?}"))?;
            (token, Some(count))
        }
        None => (line, None),
    };

    if token.is_empty() {
        return Err("empty token".to_string());
    }
    Ok((token, count))
}

/// Read entries; bare tokens get frequency 1.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<LoadedEntry>> {
    let mut entries = Vec::new();
    let mut seen = AHashSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(VocabError::io)?;
        let lineno = i + 1;

        let (token, count) =
            parse_line(&line).map_err(|message| VocabError::corrupt(lineno, message))?;

        let entry = LoadedEntry {
            token: Token::from(token),
            frequency: count.unwrap_or(1),
            counted: count.is_some(),
        };
        push_unique(&mut entries, &mut seen, entry, lineno);
    }
    Ok(entries)
}

/// Write entries in index order.
///
/// Fails with [`VocabError::Unwritable`] on empty tokens and on tokens
/// containing a tab or line break.
pub fn write_entries<W: Write>(
    store: &VocabularyStore,
    options: SerializeOptions,
    writer: &mut W,
) -> Result<()> {
    for entry in store.entries() {
        check_writable(entry.token, entry.index, VocabFormat::Default)?;

        let written = if options.with_frequencies && !store.is_special(entry.index) {
            writeln!(writer, "{}{SEPARATOR}{}", entry.token, entry.frequency)
        } else {
            writeln!(writer, "{}", entry.token)
        };
        written.map_err(VocabError::io)?;
    }
    Ok(())
}
