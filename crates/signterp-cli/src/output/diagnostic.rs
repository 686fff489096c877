//! Miette diagnostic wrapper for catalog and pattern syntax errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use signterp::parser::ParseError;
use thiserror::Error;

/// A miette-compatible diagnostic pointing at a location in a source text.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("syntax error: {message}")]
#[diagnostic(code(signterp::syntax))]
pub struct SourceDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl SourceDiagnostic {
    /// Create a diagnostic at a 1-based line and column.
    pub fn at(name: &str, content: &str, line: usize, column: usize, message: &str) -> Self {
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        SourceDiagnostic {
            src: NamedSource::new(name, content.to_string()),
            span: (offset, 1).into(),
            message: message.to_string(),
            help: None,
        }
    }

    /// Create a diagnostic from a pattern ParseError.
    pub fn from_parse_error(name: &str, pattern: &str, err: &ParseError) -> Self {
        match err {
            ParseError::Syntax {
                line,
                column,
                message,
            } => {
                let mut diagnostic = Self::at(name, pattern, *line, *column, message);
                diagnostic.help = Some("patterns are bracketed tags, e.g. [PRON] [VERB]".into());
                diagnostic
            }
            ParseError::Empty => {
                let mut diagnostic = Self::at(name, pattern, 1, 1, "empty pattern");
                diagnostic.help = Some("a pattern needs at least one [TAG]".into());
                diagnostic
            }
        }
    }
}
