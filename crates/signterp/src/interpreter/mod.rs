//! Interpretation engine.
//!
//! Resolves tokens through a [`LexiconResolver`], matches the resulting
//! part-of-speech sequence against rules from a [`RuleStore`], and renders
//! the chosen template with help from a [`Morphology`].

mod catalog;
mod engine;
mod error;
mod lint;
mod locale;
mod morphology;
mod normalize;
mod oracle;
mod render;

pub use catalog::{Catalog, CatalogDocument, Lexeme, SignLink};
pub use engine::{
    CONCATENATION_CONFIDENCE, Interpretation, Interpreter, Outcome, RULE_MATCH_CONFIDENCE,
    UNRESOLVED_CONFIDENCE, select_rule,
};
pub use error::{
    BoxError, CatalogProblem, InterpretError, LoadError, LookupError, RequestError,
};
pub use lint::{RuleWarning, compute_suggestions, lint_rule, lint_rules};
pub use locale::{canonical_locale, locale_matches};
pub use morphology::{ConjugationEntry, ConjugationTable};
pub use normalize::normalize_gloss;
pub use oracle::{LexiconResolver, Morphology, RuleStore};
pub use render::{DEFAULT_CONJUGATION, render, render_template};
