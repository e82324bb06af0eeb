//! # Vocabulary Errors

use std::path::Path;
use thiserror::Error;

/// Name used for errors raised while reading from an anonymous stream.
pub const STREAM_SOURCE: &str = "<stream>";

/// Result alias for vocabulary operations.
pub type Result<T> = std::result::Result<T, VocabError>;

/// Failures raised by vocabulary construction and serialization.
#[derive(Error, Debug)]
pub enum VocabError {
    /// An input is missing or unreadable, or an output is not writable.
    #[error("IO error on {source_name}: {source}")]
    Io {
        /// The file (or stream) being accessed.
        source_name: String,

        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An unrecognized vocabulary format name.
    #[error("invalid vocabulary format: {0:?}")]
    Format(String),

    /// A vocabulary file which does not match its declared format.
    #[error("corrupt vocabulary {source_name} at line {line}: {message}")]
    CorruptInput {
        /// The file (or stream) being parsed.
        source_name: String,

        /// The 1-based line number.
        line: usize,

        /// What was wrong with the line.
        message: String,
    },

    /// Invalid numeric configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A tokenizer failed on an input line.
    #[error("tokenizer failed on {source_name} at line {line}: {message}")]
    Tokenize {
        /// The file (or stream) being tokenized.
        source_name: String,

        /// The 1-based line number; 0 when not yet known.
        line: usize,

        /// The tokenizer's error.
        message: String,
    },

    /// A token which cannot be written in a line-oriented vocabulary file.
    ///
    /// Empty tokens and tokens containing `\t`, `\n` or `\r` would not read
    /// back as the same token.
    #[error("token {token:?} at index {index} cannot be written in the {format} format")]
    Unwritable {
        /// The offending token.
        token: String,

        /// The token's index in the store.
        index: usize,

        /// The target format name.
        format: &'static str,
    },
}

impl VocabError {
    /// Wrap an [`std::io::Error`] raised on an anonymous stream.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io {
            source_name: STREAM_SOURCE.to_string(),
            source,
        }
    }

    /// Wrap an [`std::io::Error`] raised on `path`.
    pub fn io_at<P: AsRef<Path>>(
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            source_name: path.as_ref().display().to_string(),
            source,
        }
    }

    /// Build a [`VocabError::CorruptInput`] for an anonymous stream.
    pub fn corrupt<S: Into<String>>(
        line: usize,
        message: S,
    ) -> Self {
        Self::CorruptInput {
            source_name: STREAM_SOURCE.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Build a [`VocabError::Tokenize`] whose line is not yet known.
    pub fn tokenize<S: Into<String>>(message: S) -> Self {
        Self::Tokenize {
            source_name: STREAM_SOURCE.to_string(),
            line: 0,
            message: message.into(),
        }
    }

    /// Attach a 1-based line number to errors that carry one.
    pub fn at_line(
        self,
        line: usize,
    ) -> Self {
        match self {
            Self::CorruptInput {
                source_name,
                message,
                ..
            } => Self::CorruptInput {
                source_name,
                line,
                message,
            },
            Self::Tokenize {
                source_name,
                message,
                ..
            } => Self::Tokenize {
                source_name,
                line,
                message,
            },
            other => other,
        }
    }

    /// Attach a file path to errors that carry a source name.
    pub fn with_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Self {
        let name = path.as_ref().display().to_string();
        match self {
            Self::Io { source, .. } => Self::Io {
                source_name: name,
                source,
            },
            Self::CorruptInput { line, message, .. } => Self::CorruptInput {
                source_name: name,
                line,
                message,
            },
            Self::Tokenize { line, message, .. } => Self::Tokenize {
                source_name: name,
                line,
                message,
            },
            other => other,
        }
    }
}
