//! Closed conjugation lookup.
//!
//! This is a table, not a conjugator: any gloss, conjugation and person
//! combination that was never inserted is unknown.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::interpreter::{LookupError, Morphology};

/// One row of a conjugation table as stored in a catalog document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConjugationEntry {
    pub gloss: String,
    pub conj: String,
    #[serde(default)]
    pub person: Option<u8>,
    pub surface: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct ConjugationKey {
    gloss: String,
    conjugation: String,
    person: Option<u8>,
}

impl ConjugationKey {
    fn new(gloss: &str, conjugation: &str, person: Option<u8>) -> Self {
        Self {
            gloss: gloss.trim().to_uppercase(),
            conjugation: conjugation.to_string(),
            person,
        }
    }
}

/// Inflected forms keyed by normalized gloss, conjugation code and person.
#[derive(Debug, Clone, Default)]
pub struct ConjugationTable {
    forms: HashMap<ConjugationKey, String>,
}

impl ConjugationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Spanish present-tense forms.
    ///
    /// # Example
    ///
    /// ```
    /// use signterp::ConjugationTable;
    ///
    /// let table = ConjugationTable::spanish();
    /// assert_eq!(table.lookup("querer", "pres", Some(1)), Some("quiero"));
    /// assert_eq!(table.lookup("QUERER", "pret", Some(1)), None);
    /// ```
    pub fn spanish() -> Self {
        let mut table = Self::new();
        for (gloss, forms) in [
            ("AMAR", ["amo", "amas", "ama"]),
            ("QUERER", ["quiero", "quieres", "quiere"]),
        ] {
            for (person, form) in (1..=3).zip(forms) {
                table.insert(gloss, "pres", Some(person), form);
            }
        }
        table
    }

    /// Add or replace a form.
    pub fn insert(
        &mut self,
        gloss: &str,
        conjugation: &str,
        person: Option<u8>,
        surface: impl Into<String>,
    ) {
        self.forms
            .insert(ConjugationKey::new(gloss, conjugation, person), surface.into());
    }

    pub fn extend(&mut self, entries: impl IntoIterator<Item = ConjugationEntry>) {
        for entry in entries {
            self.insert(&entry.gloss, &entry.conj, entry.person, entry.surface);
        }
    }

    /// The inflected form, if the table knows it. Glosses are matched after
    /// trimming and uppercasing.
    pub fn lookup(&self, gloss: &str, conjugation: &str, person: Option<u8>) -> Option<&str> {
        self.forms
            .get(&ConjugationKey::new(gloss, conjugation, person))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }
}

impl Morphology for ConjugationTable {
    fn inflect(
        &self,
        gloss: &str,
        conjugation: &str,
        person: Option<u8>,
    ) -> Result<Option<String>, LookupError> {
        Ok(self.lookup(gloss, conjugation, person).map(str::to_string))
    }
}
