//! Error types for interpretation and catalog loading.

use std::error::Error as StdError;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed backend error carried by a [`LookupError`].
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// An oracle failed to complete a lookup.
///
/// These are backend failures (storage unreachable, corrupt data, and so
/// on). They are never converted into fallback text.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lexicon lookup failed for sign '{sign_id}': {source}")]
    Lexicon {
        sign_id: String,
        #[source]
        source: BoxError,
    },

    #[error("rule lookup failed for locale '{locale}': {source}")]
    Rules {
        locale: String,
        #[source]
        source: BoxError,
    },

    #[error("morphology lookup failed for '{gloss}': {source}")]
    Morphology {
        gloss: String,
        #[source]
        source: BoxError,
    },
}

/// An error returned by [`Interpreter::interpret`](crate::Interpreter::interpret).
///
/// Every linguistic gap has a fallback, so the only failure is an oracle
/// that could not answer.
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// A request violates a token invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("token {index} ('{sign_id}') ends at {end_ms} before it starts at {start_ms}")]
    EndBeforeStart {
        index: usize,
        sign_id: String,
        start_ms: i64,
        end_ms: i64,
    },

    #[error("token {index} ('{sign_id}') has confidence {confidence}, expected 0..=1")]
    ConfidenceOutOfRange {
        index: usize,
        sign_id: String,
        confidence: f32,
    },
}

/// Errors that occur while loading a catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the catalog file.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid catalog JSON.
    #[error("{path}:{line}:{column}: {message}")]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The document parsed but its tables are inconsistent.
    #[error("{path}: {problem}")]
    Catalog { path: PathBuf, problem: CatalogProblem },
}

/// An inconsistency between catalog tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProblem {
    DuplicateLexeme { id: u32 },
    DuplicateRule { id: u32 },
    UnknownLexeme { sign_id: String, lexeme_id: u32 },
}

impl Display for CatalogProblem {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            CatalogProblem::DuplicateLexeme { id } => write!(f, "duplicate lexeme id {id}"),
            CatalogProblem::DuplicateRule { id } => write!(f, "duplicate rule id {id}"),
            CatalogProblem::UnknownLexeme { sign_id, lexeme_id } => {
                write!(f, "sign '{sign_id}' links to unknown lexeme {lexeme_id}")
            }
        }
    }
}
