//! Converts sequences of recognized sign-language gestures into text.
//!
//! Each [`Token`] names a recognized sign. The [`Interpreter`] resolves signs
//! to lexical items, applies the first grammar rule whose part-of-speech
//! pattern matches the whole sequence, and falls back to joining glosses
//! when none does.

pub mod interpreter;
pub mod parser;
pub mod types;

pub use interpreter::{
    Catalog, ConjugationTable, InterpretError, Interpretation, Interpreter, LexiconResolver,
    LoadError, LookupError, Morphology, Outcome, RequestError, RuleStore, RuleWarning, lint_rules,
    normalize_gloss, render,
};
pub use types::{
    DEFAULT_CONFIDENCE, DEFAULT_LOCALE, GrammarRule, InterpretRequest, InterpretResponse,
    LexicalCandidate, PosTag, Priority, ResolvedToken, Token,
};
