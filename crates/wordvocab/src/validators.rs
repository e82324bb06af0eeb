//! Validators for numeric configuration options.
use crate::errors::{Result, VocabError};
use fancy_regex::{Regex, RegexBuilder};

/// Validates and returns the size multiple.
pub fn try_size_multiple(multiple: i64) -> Result<i64> {
    if multiple < 0 {
        Err(VocabError::Config(format!(
            "size_multiple ({multiple}) must be >= 0"
        )))
    } else {
        Ok(multiple)
    }
}

/// Validates and returns the number of OOV buckets.
pub fn try_num_oov_buckets(num_oov_buckets: i64) -> Result<i64> {
    if num_oov_buckets < 0 {
        Err(VocabError::Config(format!(
            "num_oov_buckets ({num_oov_buckets}) must be >= 0"
        )))
    } else {
        Ok(num_oov_buckets)
    }
}

/// Validates and compiles a tokenizer regex pattern.
pub fn try_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|err| VocabError::Config(format!("regex pattern {pattern:?}: {err}")))
}

/// Validates and compiles a tokenizer regex pattern with a backtrack limit.
pub fn try_regex_with_backtrack_limit(
    pattern: &str,
    backtrack_limit: usize,
) -> Result<Regex> {
    if backtrack_limit == 0 {
        return Err(VocabError::Config(
            "backtrack_limit (0) must be > 0".to_string(),
        ));
    }
    RegexBuilder::new(pattern)
        .backtrack_limit(backtrack_limit)
        .build()
        .map_err(|err| VocabError::Config(format!("regex pattern {pattern:?}: {err}")))
}
