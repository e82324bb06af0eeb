//! # SentencePiece Vocabulary Format
//!
//! Two tab-separated columns per line: the piece and its score. Scores are
//! not counts; on read they are discarded and replaced by a nominal
//! frequency that decreases with line order.

use crate::errors::{Result, VocabError};
use crate::types::{Frequency, Token};
use crate::vocab::io::{LoadedEntry, VocabFormat, check_writable, push_unique};
use crate::vocab::specials::{END_OF_SENTENCE_TOKEN, START_OF_SENTENCE_TOKEN, UNKNOWN_TOKEN};
use crate::vocab::store::VocabularyStore;
use ahash::AHashSet;
use std::io::{BufRead, Write};

/// Pieces that SentencePiece reserves for itself; skipped on read.
pub const BUILTIN_PIECES: [&str; 3] = [UNKNOWN_TOKEN, START_OF_SENTENCE_TOKEN, END_OF_SENTENCE_TOKEN];

/// Parse one line into ``(piece, score)``.
pub fn parse_line(line: &str) -> std::result::Result<(&str, f64), String> {
    let mut columns = line.split('\t');
    let (Some(piece), Some(score), None) = (columns.next(), columns.next(), columns.next()) else {
        return Err("expected 2 tab-separated columns".to_string());
    };

    if piece.is_empty() {
        return Err("empty token".to_string());
    }
    let score = score
        .parse::<f64>()
        .map_err(|_| format!("invalid score {score:?}"))?;
    Ok((piece, score))
}

/// Read entries.
///
/// Of `n` kept pieces, the `i`-th (from 0) gets nominal frequency `n - i`.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<LoadedEntry>> {
    let mut entries = Vec::new();
    let mut seen = AHashSet::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(VocabError::io)?;
        let lineno = i + 1;

        let (piece, _score) =
            parse_line(&line).map_err(|message| VocabError::corrupt(lineno, message))?;
        if BUILTIN_PIECES.contains(&piece) {
            continue;
        }

        let entry = LoadedEntry {
            token: Token::from(piece),
            frequency: 0,
            counted: false,
        };
        push_unique(&mut entries, &mut seen, entry, lineno);
    }

    let n = entries.len() as Frequency;
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.frequency = n - i as Frequency;
    }
    Ok(entries)
}

/// Write entries in index order, with score ``-index``.
pub fn write_entries<W: Write>(
    store: &VocabularyStore,
    writer: &mut W,
) -> Result<()> {
    for entry in store.entries() {
        check_writable(entry.token, entry.index, VocabFormat::SentencePiece)?;
        let score = 0.0 - entry.index as f64;
        writeln!(writer, "{}\t{score}", entry.token).map_err(VocabError::io)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizers::whitespace_tokenize;
    use crate::vocab::io::read_vocab;
    use std::io::Cursor;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("▁the\t-3.125"), Ok(("▁the", -3.125)));
        assert_eq!(parse_line("x\t0"), Ok(("x", 0.0)));

        assert!(parse_line("x").is_err());
        assert!(parse_line("x\t1\t2").is_err());
        assert_eq!(parse_line("x\tabc").unwrap_err(), "invalid score \"abc\"");
        assert_eq!(parse_line("\t0").unwrap_err(), "empty token");
    }

    #[test]
    fn test_read_entries() {
        let text = "<unk>\t0\n<s>\t0\n</s>\t0\n▁a\t-1.5\n▁b\t-2.5\n▁c\t-3\n";
        let entries = read_entries(Cursor::new(text)).unwrap();

        let pairs: Vec<(&str, Frequency)> = entries
            .iter()
            .map(|e| (e.token.as_str(), e.frequency))
            .collect();
        assert_eq!(pairs, vec![("▁a", 3), ("▁b", 2), ("▁c", 1)]);
        assert!(entries.iter().all(|e| !e.counted));
    }

    #[test]
    fn test_read_corrupt() {
        let err = read_entries(Cursor::new("a\t-1\nb -2\n")).unwrap_err();
        assert!(matches!(err, VocabError::CorruptInput { line: 2, .. }));
    }

    #[test]
    fn test_write_rejects_tab_in_piece() {
        let store = VocabularyStore::new(["<blank>", "a\tb"]);
        let err = write_entries(&store, &mut Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            VocabError::Unwritable {
                index: 1,
                format: "sentencepiece",
                ..
            }
        ));
    }

    #[test]
    fn test_round_trip_order() {
        let mut store = VocabularyStore::new(["<blank>"]);
        store.add_from_lines(["z y z x z y"], whitespace_tokenize);

        let mut buf = Vec::new();
        write_entries(&store, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "<blank>\t0\nz\t-1\ny\t-2\nx\t-3\n"
        );

        let mut loaded = VocabularyStore::new(["<blank>"]);
        loaded.merge_loaded(read_vocab(Cursor::new(buf), VocabFormat::SentencePiece).unwrap());

        assert_eq!(loaded.tokens(), store.tokens());
        assert!(loaded.frequency("z") > loaded.frequency("y"));
        assert!(loaded.frequency("y") > loaded.frequency("x"));
    }
}
