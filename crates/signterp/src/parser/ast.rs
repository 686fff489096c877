//! Public AST types for rule templates and part-of-speech patterns.
//!
//! These types are public so authoring tools can inspect rules without
//! rendering them.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::types::PosTag;

/// A scanned template string.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    /// Iterate over the placeholders in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(p),
            Segment::Literal(_) | Segment::StrayBrace(_) => None,
        })
    }

    /// Returns true if any brace in the source was not part of a placeholder
    /// or an escape sequence.
    pub fn has_stray_braces(&self) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::StrayBrace(_)))
    }
}

/// A segment within a template.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, with `{{`/`}}` escapes already resolved.
    Literal(String),
    /// `{TAG}` or `{TAG:key=value,...}`
    Placeholder(Placeholder),
    /// A `{` or `}` that does not open or close a well-formed placeholder.
    /// Rendered verbatim.
    StrayBrace(char),
}

/// A placeholder naming a part of speech, with optional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub tag: PosTag,
    pub params: Vec<Param>,
}

impl Placeholder {
    /// Look up a parameter value by key. The first occurrence wins; a key
    /// given without a value counts as absent.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
            .filter(|value| !value.is_empty())
    }
}

/// A `key=value` parameter inside a placeholder. A bare `key` has an empty
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// A parsed part-of-speech pattern such as `[PRON] [VERB] [NOUN]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PosPattern {
    pub tags: Vec<PosTag>,
}

impl PosPattern {
    /// Exact structural match against a sequence of tags: same length, same
    /// tags, same order.
    pub fn matches<'a>(&self, sequence: impl IntoIterator<Item = &'a PosTag>) -> bool {
        let mut sequence = sequence.into_iter();
        for tag in &self.tags {
            match sequence.next() {
                Some(other) if other == tag => {}
                _ => return false,
            }
        }
        sequence.next().is_none()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.as_str() == tag)
    }
}

impl Display for PosPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rendered = self
            .tags
            .iter()
            .map(|tag| format!("[{tag}]"))
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{rendered}")
    }
}
