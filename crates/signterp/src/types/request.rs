use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::interpreter::RequestError;

/// Confidence assumed for a token when the recognizer does not report one.
pub const DEFAULT_CONFIDENCE: f32 = 0.7;

/// Locale used when a request does not name one.
pub const DEFAULT_LOCALE: &str = "es-MX";

fn default_confidence() -> f32 {
    DEFAULT_CONFIDENCE
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// One recognized gesture.
///
/// Field names on the wire follow the recognizer's JSON (`signId`, `tStart`,
/// `tEnd`, `conf`). Times are milliseconds; `end_ms >= start_ms` and a
/// confidence within `[0, 1]` are expected, see [`InterpretRequest::validate`].
///
/// # Example
///
/// ```
/// use signterp::Token;
///
/// let token = Token::builder().sign_id("YO").build();
/// assert_eq!(token.confidence, 0.7);
/// ```
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct Token {
    #[serde(rename = "signId")]
    pub sign_id: String,

    #[serde(rename = "tStart")]
    #[builder(default)]
    pub start_ms: i64,

    #[serde(rename = "tEnd")]
    #[builder(default)]
    pub end_ms: i64,

    #[serde(rename = "conf", default = "default_confidence")]
    #[builder(default = DEFAULT_CONFIDENCE)]
    pub confidence: f32,
}

impl Token {
    /// A token with zero timestamps and the default confidence.
    pub fn new(sign_id: impl Into<String>) -> Self {
        Token::builder().sign_id(sign_id.into()).build()
    }
}

/// A time-ordered sequence of tokens to interpret for one locale.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct InterpretRequest {
    #[builder(default)]
    pub tokens: Vec<Token>,

    #[serde(default = "default_locale")]
    #[builder(default = default_locale())]
    pub locale: String,
}

impl InterpretRequest {
    /// A request for the default locale.
    pub fn new(tokens: Vec<Token>) -> Self {
        InterpretRequest::builder().tokens(tokens).build()
    }

    /// Check the per-token invariants the recognizer is expected to uphold.
    ///
    /// The interpreter itself accepts any request; callers at the process
    /// boundary run this first.
    pub fn validate(&self) -> Result<(), RequestError> {
        for (index, token) in self.tokens.iter().enumerate() {
            if token.end_ms < token.start_ms {
                return Err(RequestError::EndBeforeStart {
                    index,
                    sign_id: token.sign_id.clone(),
                    start_ms: token.start_ms,
                    end_ms: token.end_ms,
                });
            }
            if !(0.0..=1.0).contains(&token.confidence) {
                return Err(RequestError::ConfidenceOutOfRange {
                    index,
                    sign_id: token.sign_id.clone(),
                    confidence: token.confidence,
                });
            }
        }
        Ok(())
    }
}

/// The interpreted text.
///
/// `alternatives` is serialized as `alt` and is currently always empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretResponse {
    pub text: String,

    #[serde(rename = "alt", default)]
    pub alternatives: Vec<String>,

    #[serde(default = "default_confidence")]
    pub confidence: f32,
}

impl InterpretResponse {
    pub fn new(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            alternatives: Vec::new(),
            confidence,
        }
    }
}
