//! Template rendering against resolved tokens.
//!
//! Placeholders are keyed by part of speech, not by position: every `{NOUN}`
//! receives the first NOUN token of the request. A placeholder whose part of
//! speech is absent from the request renders as nothing.

use crate::interpreter::normalize::normalize_gloss;
use crate::interpreter::{LookupError, Morphology};
use crate::parser::ast::{Placeholder, Segment, Template};
use crate::parser::parse_template;
use crate::types::ResolvedToken;

/// Conjugation code used by a VERB placeholder without `conj=`.
pub const DEFAULT_CONJUGATION: &str = "infinitive";

/// Scan and render a template string.
///
/// # Example
///
/// ```
/// use signterp::{ConjugationTable, LexicalCandidate, ResolvedToken, render};
///
/// let tokens = vec![ResolvedToken {
///     sign_id: "PAN".to_string(),
///     candidate: LexicalCandidate::new("PAN", "NOUN"),
///     confidence: 0.7,
/// }];
/// let text = render("quiero  {NOUN} {ADJ}", &tokens, &ConjugationTable::new()).unwrap();
/// assert_eq!(text, "quiero pan");
/// ```
pub fn render(
    template: &str,
    tokens: &[ResolvedToken],
    morphology: &dyn Morphology,
) -> Result<String, LookupError> {
    render_template(&parse_template(template), tokens, morphology)
}

/// Render a scanned template.
///
/// Whitespace runs in the output are collapsed to single spaces and the
/// result is trimmed. The only error is a failed morphology lookup.
pub fn render_template(
    template: &Template,
    tokens: &[ResolvedToken],
    morphology: &dyn Morphology,
) -> Result<String, LookupError> {
    let mut output = String::new();
    for segment in &template.segments {
        match segment {
            Segment::Literal(text) => output.push_str(text),
            Segment::StrayBrace(c) => output.push(*c),
            Segment::Placeholder(placeholder) => {
                output.push_str(&fill_placeholder(placeholder, tokens, morphology)?);
            }
        }
    }
    Ok(collapse_whitespace(&output))
}

fn fill_placeholder(
    placeholder: &Placeholder,
    tokens: &[ResolvedToken],
    morphology: &dyn Morphology,
) -> Result<String, LookupError> {
    let Some(token) = tokens.iter().find(|t| *t.pos() == placeholder.tag) else {
        return Ok(String::new());
    };

    if !placeholder.tag.is_verb() {
        return Ok(normalize_gloss(token.gloss()));
    }

    let conjugation = placeholder.param("conj").unwrap_or(DEFAULT_CONJUGATION);
    let person = placeholder
        .param("persona")
        .or_else(|| placeholder.param("person"))
        .and_then(parse_person);
    let inflected = morphology.inflect(token.gloss(), conjugation, person)?;
    Ok(inflected.unwrap_or_else(|| normalize_gloss(token.gloss())))
}

/// Grammatical person 1, 2 or 3. Anything else means no person.
fn parse_person(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|p| (1..=3).contains(p))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
