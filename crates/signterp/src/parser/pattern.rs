//! Part-of-speech pattern parser: `[PRON] [VERB] [NOUN]`.
//!
//! Whitespace between and inside the brackets is insignificant, so
//! `[PRON][VERB]` and `[ PRON ] [ VERB ]` parse to the same pattern.

use winnow::combinator::{delimited, repeat, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

use super::ast::PosPattern;
use super::error::ParseError;
use crate::types::PosTag;

/// Parse a pattern string into its tag sequence.
pub fn parse_pattern(input: &str) -> Result<PosPattern, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let mut remaining = input;
    match pattern(&mut remaining) {
        Ok(tags) if remaining.is_empty() => Ok(PosPattern { tags }),
        Ok(_) | Err(_) => {
            let (line, column) = calculate_position(input, remaining);
            Err(ParseError::Syntax {
                line,
                column,
                message: match remaining.chars().next() {
                    Some(c) => format!("expected '[TAG]', found '{c}'"),
                    None => "expected '[TAG]'".to_string(),
                },
            })
        }
    }
}

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed - pos,
        None => consumed + 1,
    };
    (line, column)
}

fn pattern(input: &mut &str) -> ModalResult<Vec<PosTag>> {
    let _ = ws(input)?;
    repeat(1.., terminated(bracketed_tag, ws)).parse_next(input)
}

fn bracketed_tag(input: &mut &str) -> ModalResult<PosTag> {
    delimited(('[', ws), tag, (ws, ']'))
        .map(PosTag::from)
        .parse_next(input)
}

/// Any run of characters other than whitespace and brackets, so tags such
/// as `AUX-V` or `V.PART` are accepted.
fn tag<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| !c.is_whitespace() && !matches!(c, '[' | ']')).parse_next(input)
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}
