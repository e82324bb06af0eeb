//! # Regex Word Tokenizer

use crate::errors::{Result, VocabError};
use crate::tokenizers::Tokenizer;
use crate::types::Token;
use crate::validators;

/// Default pattern: runs of word characters, and runs of punctuation.
pub const WORD_PATTERN: &str = r"\w+|[^\w\s]+";

/// Tokenizes each regex match as one token.
#[derive(Debug, Clone)]
pub struct RegexTokenizer {
    /// The regex pattern used for text splitting.
    pattern: String,

    /// The compiled regex pattern.
    regex: fancy_regex::Regex,
}

impl Default for RegexTokenizer {
    fn default() -> Self {
        Self {
            pattern: WORD_PATTERN.to_string(),
            regex: fancy_regex::Regex::new(WORD_PATTERN).unwrap(),
        }
    }
}

impl RegexTokenizer {
    /// Compile a tokenizer from a pattern.
    pub fn new<S: AsRef<str>>(pattern: S) -> Result<Self> {
        let pattern = pattern.as_ref();
        let regex = validators::try_regex(pattern)?;
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// Recompile with a backtracking step limit.
    ///
    /// Lines which exceed the limit fail to tokenize.
    pub fn with_backtrack_limit(
        self,
        backtrack_limit: usize,
    ) -> Result<Self> {
        let regex = validators::try_regex_with_backtrack_limit(&self.pattern, backtrack_limit)?;
        Ok(Self { regex, ..self })
    }

    /// Get the regex pattern used for text splitting.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Tokenizer for RegexTokenizer {
    fn tokenize(
        &self,
        line: &str,
    ) -> Result<Vec<Token>> {
        self.regex
            .find_iter(line)
            .map(|mat| {
                mat.map(|mat| Token::from(mat.as_str())).map_err(|err| {
                    VocabError::tokenize(format!("regex pattern {:?}: {err}", self.pattern))
                })
            })
            .collect()
    }
}
