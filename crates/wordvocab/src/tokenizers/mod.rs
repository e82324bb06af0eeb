//! # Tokenizers
//!
//! Vocabulary building treats tokenization as an injected function
//! ``FnMut(&str) -> impl IntoIterator<Item: AsRef<str>>``, or its fallible
//! form returning [`crate::Result`]; any such function works. The
//! implementations here cover the common word-level cases.

mod regex_tokenizer;

pub use regex_tokenizer::{RegexTokenizer, WORD_PATTERN};

use crate::errors::Result;
use crate::types::Token;

/// A line tokenizer.
///
/// Implementations must be deterministic for vocabularies to be
/// reproducible.
pub trait Tokenizer {
    /// Split a line into tokens.
    ///
    /// # Errors
    /// [`crate::VocabError::Tokenize`] if the line cannot be tokenized.
    fn tokenize(
        &self,
        line: &str,
    ) -> Result<Vec<Token>>;
}

/// Splits on Unicode whitespace.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(
        &self,
        line: &str,
    ) -> Result<Vec<Token>> {
        Ok(whitespace_tokenize(line))
    }
}

/// Split a line on Unicode whitespace.
pub fn whitespace_tokenize(line: &str) -> Vec<Token> {
    line.split_whitespace().map(Token::from).collect()
}
