//! Template scanner using winnow.
//!
//! Distinguishes literal text from placeholder spans:
//! - `{TAG}` and `{TAG:key=value,key}`, where TAG is any run of characters
//!   other than whitespace, `:` and braces
//! - Escape sequences: `{{` and `}}`
//! - Any other brace is kept as a [`Segment::StrayBrace`]

use winnow::combinator::{alt, delimited, opt, preceded, repeat, separated};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::{Param, Placeholder, Segment, Template};
use crate::types::PosTag;

/// Scan a template string into segments.
///
/// Scanning is total: every input produces a template, and rendering the
/// segments of a template without placeholders reproduces the source text
/// with escapes resolved.
pub fn parse_template(input: &str) -> Template {
    let mut remaining = input;
    let parsed: ModalResult<Vec<Segment>> = repeat(0.., segment).parse_next(&mut remaining);
    let mut segments = parsed.unwrap_or_default();
    if !remaining.is_empty() {
        segments.push(Segment::Literal(remaining.to_string()));
    }
    Template {
        segments: merge_literals(segments),
    }
}

/// Merge adjacent Literal segments into single segments.
fn merge_literals(segments: Vec<Segment>) -> Vec<Segment> {
    let mut result = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                if let Some(Segment::Literal(prev)) = result.last_mut() {
                    prev.push_str(&text);
                } else {
                    result.push(Segment::Literal(text));
                }
            }
            other => result.push(other),
        }
    }

    result
}

fn segment(input: &mut &str) -> ModalResult<Segment> {
    alt((escape_sequence, placeholder, stray_brace, literal_run)).parse_next(input)
}

/// `{{` -> `{`, `}}` -> `}`
fn escape_sequence(input: &mut &str) -> ModalResult<Segment> {
    alt((
        "{{".value(Segment::Literal("{".to_string())),
        "}}".value(Segment::Literal("}".to_string())),
    ))
    .parse_next(input)
}

fn stray_brace(input: &mut &str) -> ModalResult<Segment> {
    one_of(['{', '}']).map(Segment::StrayBrace).parse_next(input)
}

fn literal_run(input: &mut &str) -> ModalResult<Segment> {
    take_while(1.., |c: char| c != '{' && c != '}')
        .map(|s: &str| Segment::Literal(s.to_string()))
        .parse_next(input)
}

fn placeholder(input: &mut &str) -> ModalResult<Segment> {
    delimited('{', placeholder_content, '}').parse_next(input)
}

fn placeholder_content(input: &mut &str) -> ModalResult<Segment> {
    let _ = ws(input)?;
    let tag = tag_name(input)?;
    let _ = ws(input)?;
    let params: Option<Vec<Param>> =
        opt(preceded(':', separated(0.., param, ','))).parse_next(input)?;
    let _ = ws(input)?;
    Ok(Segment::Placeholder(Placeholder {
        tag: PosTag::from(tag),
        params: params
            .unwrap_or_default()
            .into_iter()
            .filter(|p| !p.key.is_empty())
            .collect(),
    }))
}

/// `key=value` or a bare `key`. Keys run to `=`, `,` or `}`; values run to
/// `,` or `}`. A bare key has an empty value.
fn param(input: &mut &str) -> ModalResult<Param> {
    let key = take_while(0.., |c: char| !matches!(c, '=' | ',' | '{' | '}')).parse_next(input)?;
    let value: Option<&str> =
        opt(preceded('=', take_while(0.., |c: char| !matches!(c, ',' | '{' | '}'))))
            .parse_next(input)?;
    Ok(Param {
        key: key.trim().to_string(),
        value: value.unwrap_or_default().trim().to_string(),
    })
}

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., |c: char| c.is_ascii_whitespace())
        .void()
        .parse_next(input)
}

/// A part-of-speech name: any run up to whitespace, `:` or a brace.
fn tag_name<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| {
        !c.is_whitespace() && !matches!(c, ':' | '{' | '}')
    })
    .parse_next(input)
}
