use serde::{Deserialize, Serialize};

use super::PosTag;

/// One resolvable meaning of a sign.
///
/// Glosses are canonical uppercase forms (`"QUERER"`). The optional surface
/// form is the catalog's localized spelling; rendering works from the gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalCandidate {
    pub gloss: String,
    pub pos: PosTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
}

impl LexicalCandidate {
    pub fn new(gloss: impl Into<String>, pos: impl Into<PosTag>) -> Self {
        Self {
            gloss: gloss.into(),
            pos: pos.into(),
            surface: None,
        }
    }

    /// The synthetic candidate for a sign with no lexicon mapping: the
    /// uppercased sign identifier tagged as an interjection.
    pub fn fallback(sign_id: &str) -> Self {
        Self {
            gloss: sign_id.to_uppercase(),
            pos: PosTag::interjection(),
            surface: None,
        }
    }

    pub fn with_surface(mut self, surface: impl Into<String>) -> Self {
        self.surface = Some(surface.into());
        self
    }
}

/// A token after lexicon resolution: the top candidate plus the confidence
/// the recognizer reported for the originating token.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedToken {
    pub sign_id: String,
    pub candidate: LexicalCandidate,
    pub confidence: f32,
}

impl ResolvedToken {
    pub fn gloss(&self) -> &str {
        &self.candidate.gloss
    }

    pub fn pos(&self) -> &PosTag {
        &self.candidate.pos
    }
}
