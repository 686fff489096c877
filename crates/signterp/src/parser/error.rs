//! Parse error types for rule patterns.

use thiserror::Error;

/// An error that occurred while parsing a part-of-speech pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A syntax error with location information.
    #[error("syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    /// The pattern contains no tags.
    #[error("empty pattern")]
    Empty,
}
