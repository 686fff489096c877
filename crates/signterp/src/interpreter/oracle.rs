//! Lookup capabilities the interpreter is constructed with.
//!
//! Implementations may block on I/O. The interpreter calls them once per
//! lookup and never caches their answers.

use crate::interpreter::LookupError;
use crate::types::{GrammarRule, LexicalCandidate};

/// Maps a recognized sign to its candidate lexical items.
pub trait LexiconResolver: Send + Sync {
    /// Candidates for `sign_id` in priority order (weight descending, then
    /// identifier ascending).
    ///
    /// Implementations return [`LexicalCandidate::fallback`] for an unmapped
    /// sign rather than an empty list.
    fn resolve(&self, sign_id: &str) -> Result<Vec<LexicalCandidate>, LookupError>;
}

/// Supplies grammar rules for a locale.
pub trait RuleStore: Send + Sync {
    /// Active rules tagged with `locale` or with no locale, in priority
    /// order. An empty list is valid. The interpreter uses the first rule
    /// in the returned order whose pattern matches.
    fn load_active_rules(&self, locale: &str) -> Result<Vec<GrammarRule>, LookupError>;
}

/// Inflects a gloss for a conjugation and grammatical person.
pub trait Morphology: Send + Sync {
    /// Returns `Ok(None)` when no form is known; callers fall back to the
    /// normalized gloss.
    fn inflect(
        &self,
        gloss: &str,
        conjugation: &str,
        person: Option<u8>,
    ) -> Result<Option<String>, LookupError>;
}
