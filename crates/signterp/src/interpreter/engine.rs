//! The interpretation state machine.
//!
//! Tokens are resolved to lexical items, then the request is answered by
//! the first applicable branch:
//! 1. no tokens: empty text
//! 2. nothing resolved: the raw sign identifiers
//! 3. one token: its normalized gloss
//! 4. a rule whose pattern equals the part-of-speech sequence: the rendered template
//! 5. otherwise: the normalized glosses joined by spaces

use bon::Builder;
use tracing::{debug, warn};

use crate::interpreter::catalog::Catalog;
use crate::interpreter::normalize::normalize_gloss;
use crate::interpreter::render::render;
use crate::interpreter::{InterpretError, LexiconResolver, LookupError, Morphology, RuleStore};
use crate::parser::parse_pattern;
use crate::types::{
    DEFAULT_CONFIDENCE, GrammarRule, InterpretRequest, InterpretResponse, PosTag, ResolvedToken,
    Token,
};

/// Confidence of text produced by a grammar rule.
pub const RULE_MATCH_CONFIDENCE: f32 = 0.8;

/// Confidence of glosses joined without a grammar rule.
pub const CONCATENATION_CONFIDENCE: f32 = 0.5;

/// Confidence of echoed sign identifiers when no token resolved.
pub const UNRESOLVED_CONFIDENCE: f32 = 0.0;

/// Which branch of the state machine produced a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Empty,
    Unresolved,
    SingleSign,
    RuleMatch { rule_id: u32 },
    Concatenated,
}

/// A response together with how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub response: InterpretResponse,
    pub outcome: Outcome,
    pub resolved: Vec<ResolvedToken>,
}

/// Turns token sequences into text using injected lookups.
///
/// The interpreter holds only shared references to its oracles and keeps no
/// state between calls, so one instance may serve concurrent requests.
///
/// # Example
///
/// ```
/// use signterp::{Catalog, InterpretRequest, Interpreter, Token};
///
/// let catalog = Catalog::from_json_str(r#"{
///     "lexemes": [{"id": 1, "gloss": "YO", "pos": "PRON"}],
///     "signs": [{"sign_id": "YO", "lexeme_id": 1}]
/// }"#).unwrap();
/// let interpreter = Interpreter::from_catalog(&catalog);
///
/// let request = InterpretRequest::new(vec![Token::builder().sign_id("YO").confidence(0.9).build()]);
/// let response = interpreter.interpret(&request).unwrap();
/// assert_eq!(response.text, "yo");
/// assert_eq!(response.confidence, 0.9);
/// ```
#[derive(Builder)]
pub struct Interpreter<'a> {
    lexicon: &'a dyn LexiconResolver,
    rules: &'a dyn RuleStore,
    morphology: &'a dyn Morphology,
}

impl<'a> Interpreter<'a> {
    pub fn new(
        lexicon: &'a dyn LexiconResolver,
        rules: &'a dyn RuleStore,
        morphology: &'a dyn Morphology,
    ) -> Self {
        Self {
            lexicon,
            rules,
            morphology,
        }
    }

    /// An interpreter that uses one catalog for all three lookups.
    pub fn from_catalog(catalog: &'a Catalog) -> Self {
        Self::new(catalog, catalog, catalog)
    }

    /// Interpret a request.
    ///
    /// Fails only when a lookup fails; unknown signs, unmatched patterns and
    /// unknown inflections all produce fallback text.
    pub fn interpret(&self, request: &InterpretRequest) -> Result<InterpretResponse, InterpretError> {
        Ok(self.interpret_detailed(request)?.response)
    }

    /// Interpret a request, also reporting the branch taken and the resolved
    /// tokens.
    pub fn interpret_detailed(
        &self,
        request: &InterpretRequest,
    ) -> Result<Interpretation, InterpretError> {
        if request.tokens.is_empty() {
            debug!("empty request");
            return Ok(Interpretation {
                response: InterpretResponse::new("", DEFAULT_CONFIDENCE),
                outcome: Outcome::Empty,
                resolved: Vec::new(),
            });
        }

        let resolved = self.resolve_tokens(&request.tokens)?;

        if resolved.is_empty() {
            debug!(tokens = request.tokens.len(), "no token resolved");
            let echo = request
                .tokens
                .iter()
                .map(|t| t.sign_id.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return Ok(Interpretation {
                response: InterpretResponse::new(echo, UNRESOLVED_CONFIDENCE),
                outcome: Outcome::Unresolved,
                resolved,
            });
        }

        if let [single] = resolved.as_slice() {
            debug!(gloss = single.gloss(), "single sign");
            let response = InterpretResponse::new(normalize_gloss(single.gloss()), single.confidence);
            return Ok(Interpretation {
                response,
                outcome: Outcome::SingleSign,
                resolved,
            });
        }

        let sequence: Vec<&PosTag> = resolved.iter().map(ResolvedToken::pos).collect();
        let rules = self.rules.load_active_rules(&request.locale)?;
        if let Some(rule) = select_rule(&rules, &sequence) {
            debug!(rule_id = rule.id, "rule matched");
            let text = render(&rule.template, &resolved, self.morphology)?;
            return Ok(Interpretation {
                response: InterpretResponse::new(text, RULE_MATCH_CONFIDENCE),
                outcome: Outcome::RuleMatch { rule_id: rule.id },
                resolved,
            });
        }

        debug!(candidates = rules.len(), "no rule matched");
        let text = resolved
            .iter()
            .map(|t| normalize_gloss(t.gloss()))
            .collect::<Vec<_>>()
            .join(" ");
        Ok(Interpretation {
            response: InterpretResponse::new(text, CONCATENATION_CONFIDENCE),
            outcome: Outcome::Concatenated,
            resolved,
        })
    }

    /// Keep the top candidate of each token, dropping tokens with none.
    fn resolve_tokens(&self, tokens: &[Token]) -> Result<Vec<ResolvedToken>, LookupError> {
        let mut resolved = Vec::with_capacity(tokens.len());
        for token in tokens {
            let Some(candidate) = self.lexicon.resolve(&token.sign_id)?.into_iter().next() else {
                continue;
            };
            resolved.push(ResolvedToken {
                sign_id: token.sign_id.clone(),
                candidate,
                confidence: token.confidence,
            });
        }
        Ok(resolved)
    }
}

/// The first rule, in the order given, whose pattern equals `sequence`
/// exactly.
///
/// Which rules apply to a locale and in what order is decided by the
/// [`RuleStore`]; rules are taken as returned. Rules with unparsable
/// patterns never match.
pub fn select_rule<'r>(
    rules: &'r [GrammarRule],
    sequence: &[&PosTag],
) -> Option<&'r GrammarRule> {
    rules.iter().find(|rule| match parse_pattern(&rule.pattern) {
        Ok(pattern) => pattern.matches(sequence.iter().copied()),
        Err(e) => {
            warn!(rule_id = rule.id, pattern = %rule.pattern, "skipping rule: {e}");
            false
        }
    })
}
