//! Static checks for grammar rules.
//!
//! The interpreter tolerates every one of these problems at runtime (a bad
//! pattern never matches, a missing part of speech renders as nothing), which
//! is exactly why they are worth reporting to rule authors.

use std::collections::HashSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use strsim::levenshtein;

use crate::interpreter::locale::canonical_locale;
use crate::parser::{ParseError, PosPattern, parse_pattern, parse_template};
use crate::types::{GrammarRule, PosTag};

/// A problem found in a grammar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleWarning {
    /// The pattern does not parse, so the rule can never match.
    InvalidPattern {
        rule_id: u32,
        pattern: String,
        error: ParseError,
    },

    /// The template references a part of speech the pattern lacks; the
    /// placeholder will always render as nothing.
    PlaceholderNotInPattern {
        rule_id: u32,
        tag: String,
        suggestions: Vec<String>,
    },

    /// The template has a brace that is neither a placeholder nor an escape.
    StrayBrace { rule_id: u32 },

    /// The pattern repeats a part of speech the template references. Only
    /// the first token of that part of speech is ever substituted.
    RepeatedPos { rule_id: u32, tag: String },

    /// A higher-priority active rule with the same pattern covers every
    /// locale this rule applies to.
    ShadowedRule { rule_id: u32, shadowed_by: u32 },
}

impl RuleWarning {
    pub fn rule_id(&self) -> u32 {
        match self {
            RuleWarning::InvalidPattern { rule_id, .. }
            | RuleWarning::PlaceholderNotInPattern { rule_id, .. }
            | RuleWarning::StrayBrace { rule_id }
            | RuleWarning::RepeatedPos { rule_id, .. }
            | RuleWarning::ShadowedRule { rule_id, .. } => *rule_id,
        }
    }

    /// Whether the warning means the rule is unusable rather than surprising.
    pub fn is_error(&self) -> bool {
        matches!(self, RuleWarning::InvalidPattern { .. })
    }
}

impl Display for RuleWarning {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            RuleWarning::InvalidPattern {
                rule_id,
                pattern,
                error,
            } => write!(f, "rule {rule_id}: invalid pattern '{pattern}': {error}"),
            RuleWarning::PlaceholderNotInPattern {
                rule_id,
                tag,
                suggestions,
            } => {
                write!(f, "rule {rule_id}: placeholder {{{tag}}} is not in the pattern")?;
                if !suggestions.is_empty() {
                    write!(f, " (did you mean: {})", suggestions.join(", "))?;
                }
                Ok(())
            }
            RuleWarning::StrayBrace { rule_id } => {
                write!(f, "rule {rule_id}: template has an unmatched brace")
            }
            RuleWarning::RepeatedPos { rule_id, tag } => write!(
                f,
                "rule {rule_id}: pattern repeats [{tag}] but every {{{tag}}} uses the first one"
            ),
            RuleWarning::ShadowedRule {
                rule_id,
                shadowed_by,
            } => write!(f, "rule {rule_id}: never selected, shadowed by rule {shadowed_by}"),
        }
    }
}

/// Check a single rule in isolation.
pub fn lint_rule(rule: &GrammarRule) -> Vec<RuleWarning> {
    let mut warnings = Vec::new();
    let template = parse_template(&rule.template);

    if template.has_stray_braces() {
        warnings.push(RuleWarning::StrayBrace { rule_id: rule.id });
    }

    let pattern = match parse_pattern(&rule.pattern) {
        Ok(pattern) => pattern,
        Err(error) => {
            warnings.push(RuleWarning::InvalidPattern {
                rule_id: rule.id,
                pattern: rule.pattern.clone(),
                error,
            });
            return warnings;
        }
    };

    let pattern_tags: Vec<&str> = pattern.tags.iter().map(PosTag::as_str).collect();
    let mut seen = HashSet::new();
    for placeholder in template.placeholders() {
        let tag = placeholder.tag.as_str();
        if !seen.insert(tag) {
            continue;
        }
        if !pattern.contains(tag) {
            warnings.push(RuleWarning::PlaceholderNotInPattern {
                rule_id: rule.id,
                tag: tag.to_string(),
                suggestions: compute_suggestions(tag, &pattern_tags),
            });
        } else if pattern_tags.iter().filter(|t| **t == tag).count() > 1 {
            warnings.push(RuleWarning::RepeatedPos {
                rule_id: rule.id,
                tag: tag.to_string(),
            });
        }
    }

    warnings
}

/// Check every rule, then look for rules that can never be selected.
pub fn lint_rules(rules: &[GrammarRule]) -> Vec<RuleWarning> {
    let mut warnings: Vec<RuleWarning> = rules.iter().flat_map(lint_rule).collect();

    let mut active: Vec<(&GrammarRule, PosPattern)> = rules
        .iter()
        .filter(|rule| rule.active)
        .filter_map(|rule| parse_pattern(&rule.pattern).ok().map(|p| (rule, p)))
        .collect();
    active.sort_by_key(|(rule, _)| rule.priority());

    for (index, (rule, pattern)) in active.iter().enumerate() {
        let shadow = active[..index]
            .iter()
            .find(|(earlier, earlier_pattern)| {
                earlier_pattern == pattern && covers(earlier.locale.as_deref(), rule.locale.as_deref())
            });
        if let Some((earlier, _)) = shadow {
            warnings.push(RuleWarning::ShadowedRule {
                rule_id: rule.id,
                shadowed_by: earlier.id,
            });
        }
    }

    warnings
}

/// Whether a rule scoped to `outer` applies everywhere a rule scoped to
/// `inner` does.
fn covers(outer: Option<&str>, inner: Option<&str>) -> bool {
    match (outer, inner) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(a), Some(b)) => canonical_locale(a) == canonical_locale(b),
    }
}

/// Typo suggestions using Levenshtein distance.
///
/// - distance <= 1 for names of 3 characters or fewer
/// - distance <= 2 for longer names
/// - at most 3 suggestions, closest first
pub fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut unique = HashSet::new();
    let mut suggestions: Vec<(usize, String)> = available
        .iter()
        .filter(|candidate| unique.insert(**candidate))
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, (*candidate).to_string()))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions.into_iter().take(3).map(|(_, s)| s).collect()
}
