use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// A part-of-speech tag attached to a lexical item.
///
/// The vocabulary is open: catalogs may introduce any tag, but the rule
/// language and the renderer give special meaning to a few of them
/// (see the associated constants).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosTag(String);

impl PosTag {
    pub const PRON: &'static str = "PRON";
    pub const VERB: &'static str = "VERB";
    pub const NOUN: &'static str = "NOUN";
    pub const INTJ: &'static str = "INTJ";
    pub const NEG: &'static str = "NEG";
    pub const NUM: &'static str = "NUM";

    /// Create a new tag from any string-like value.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The interjection tag assigned to signs with no lexicon mapping.
    pub fn interjection() -> Self {
        Self::new(Self::INTJ)
    }

    /// Get the tag as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for the tag whose placeholders go through morphology.
    pub fn is_verb(&self) -> bool {
        self.0 == Self::VERB
    }
}

impl Deref for PosTag {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<&str> for PosTag {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PosTag {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for PosTag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PosTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Display for PosTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}
