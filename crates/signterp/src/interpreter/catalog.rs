//! In-memory lexicon, rule and conjugation tables.
//!
//! The catalog implements all three oracle traits and can be loaded from a
//! JSON document with `lexemes`, `signs`, `rules` and `conjugations` arrays.
//! Orderings are applied here with [`Priority`], never inherited from the
//! document's array order.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::interpreter::error::{CatalogProblem, LoadError, LookupError};
use crate::interpreter::locale::locale_matches;
use crate::interpreter::morphology::{ConjugationEntry, ConjugationTable};
use crate::interpreter::{LexiconResolver, Morphology, RuleStore};
use crate::types::{GrammarRule, LexicalCandidate, PosTag, Priority};

/// A lexical item: gloss, part of speech and optional localized surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    pub id: u32,
    pub gloss: String,
    pub pos: PosTag,
    #[serde(default)]
    pub surface: Option<String>,
}

impl Lexeme {
    pub fn candidate(&self) -> LexicalCandidate {
        LexicalCandidate {
            gloss: self.gloss.clone(),
            pos: self.pos.clone(),
            surface: self.surface.clone(),
        }
    }
}

/// A weighted mapping from a sign identifier to a lexeme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignLink {
    pub sign_id: String,
    pub lexeme_id: u32,
    #[serde(default)]
    pub weight: i32,
}

impl SignLink {
    pub fn priority(&self) -> Priority {
        Priority::new(self.weight, self.lexeme_id)
    }
}

/// The serialized form of a [`Catalog`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub lexemes: Vec<Lexeme>,
    #[serde(default)]
    pub signs: Vec<SignLink>,
    #[serde(default)]
    pub rules: Vec<GrammarRule>,
    #[serde(default)]
    pub conjugations: Vec<ConjugationEntry>,
}

/// Read-only tables backing the lexicon, rule and morphology lookups.
///
/// # Example
///
/// ```
/// use signterp::{Catalog, LexiconResolver};
///
/// let catalog = Catalog::from_json_str(r#"{
///     "lexemes": [{"id": 1, "gloss": "YO", "pos": "PRON"}],
///     "signs": [{"sign_id": "YO", "lexeme_id": 1}]
/// }"#).unwrap();
///
/// let candidates = catalog.resolve("YO").unwrap();
/// assert_eq!(candidates[0].gloss, "YO");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    lexemes: HashMap<u32, Lexeme>,
    links: HashMap<String, Vec<SignLink>>,
    rules: Vec<GrammarRule>,
    conjugations: ConjugationTable,
}

impl Catalog {
    /// An empty catalog with no conjugations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from a document. The built-in Spanish conjugations are
    /// loaded first and the document's rows extend or override them.
    pub fn from_document(document: CatalogDocument) -> Result<Self, CatalogProblem> {
        let mut catalog = Catalog {
            conjugations: ConjugationTable::spanish(),
            ..Catalog::default()
        };
        for lexeme in document.lexemes {
            catalog.add_lexeme(lexeme)?;
        }
        for link in document.signs {
            catalog.link_sign(link)?;
        }
        for rule in document.rules {
            catalog.add_rule(rule)?;
        }
        catalog.conjugations.extend(document.conjugations);
        Ok(catalog)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_internal(&content, path.to_path_buf())
    }

    /// Load a catalog from a JSON string.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        Self::from_json_internal(content, PathBuf::from("<string>"))
    }

    fn from_json_internal(content: &str, path: PathBuf) -> Result<Self, LoadError> {
        let document: CatalogDocument =
            serde_json::from_str(content).map_err(|e| LoadError::Json {
                path: path.clone(),
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            })?;
        Self::from_document(document).map_err(|problem| LoadError::Catalog { path, problem })
    }

    pub fn add_lexeme(&mut self, lexeme: Lexeme) -> Result<(), CatalogProblem> {
        match self.lexemes.entry(lexeme.id) {
            Entry::Occupied(_) => Err(CatalogProblem::DuplicateLexeme { id: lexeme.id }),
            Entry::Vacant(slot) => {
                slot.insert(lexeme);
                Ok(())
            }
        }
    }

    /// Map a sign to an existing lexeme.
    pub fn link_sign(&mut self, link: SignLink) -> Result<(), CatalogProblem> {
        if !self.lexemes.contains_key(&link.lexeme_id) {
            return Err(CatalogProblem::UnknownLexeme {
                sign_id: link.sign_id,
                lexeme_id: link.lexeme_id,
            });
        }
        self.links
            .entry(link.sign_id.clone())
            .or_default()
            .push(link);
        Ok(())
    }

    pub fn add_rule(&mut self, rule: GrammarRule) -> Result<(), CatalogProblem> {
        if self.rules.iter().any(|r| r.id == rule.id) {
            return Err(CatalogProblem::DuplicateRule { id: rule.id });
        }
        self.rules.push(rule);
        Ok(())
    }

    /// All rules, active or not, in insertion order.
    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    pub fn conjugations(&self) -> &ConjugationTable {
        &self.conjugations
    }

    pub fn conjugations_mut(&mut self) -> &mut ConjugationTable {
        &mut self.conjugations
    }

    pub fn lexeme_count(&self) -> usize {
        self.lexemes.len()
    }

    pub fn sign_count(&self) -> usize {
        self.links.len()
    }
}

impl LexiconResolver for Catalog {
    fn resolve(&self, sign_id: &str) -> Result<Vec<LexicalCandidate>, LookupError> {
        trace!(sign_id, "resolving sign");
        let mut links: Vec<&SignLink> = self
            .links
            .get(sign_id)
            .map(|links| links.iter().collect())
            .unwrap_or_default();
        links.sort_by_key(|link| link.priority());

        let candidates: Vec<LexicalCandidate> = links
            .into_iter()
            .filter_map(|link| self.lexemes.get(&link.lexeme_id))
            .map(Lexeme::candidate)
            .collect();

        if candidates.is_empty() {
            return Ok(vec![LexicalCandidate::fallback(sign_id)]);
        }
        Ok(candidates)
    }
}

impl RuleStore for Catalog {
    fn load_active_rules(&self, locale: &str) -> Result<Vec<GrammarRule>, LookupError> {
        trace!(locale, "loading active rules");
        let mut rules: Vec<GrammarRule> = self
            .rules
            .iter()
            .filter(|rule| rule.active && locale_matches(rule.locale.as_deref(), locale))
            .cloned()
            .collect();
        rules.sort_by_key(GrammarRule::priority);
        Ok(rules)
    }
}

impl Morphology for Catalog {
    fn inflect(
        &self,
        gloss: &str,
        conjugation: &str,
        person: Option<u8>,
    ) -> Result<Option<String>, LookupError> {
        self.conjugations.inflect(gloss, conjugation, person)
    }
}
