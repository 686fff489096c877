//! Gloss normalization for output text.

/// Glosses whose output form is not simply their lowercase spelling.
const GLOSS_OVERRIDES: &[(&str, &str)] = &[("YO", "yo"), ("TU", "tú"), ("NO", "no")];

/// Normalized surface for a gloss: a fixed form for the override table,
/// otherwise the gloss lowercased verbatim.
///
/// # Example
///
/// ```
/// use signterp::normalize_gloss;
///
/// assert_eq!(normalize_gloss("TU"), "tú");
/// assert_eq!(normalize_gloss("QUERER"), "querer");
/// ```
pub fn normalize_gloss(gloss: &str) -> String {
    GLOSS_OVERRIDES
        .iter()
        .find(|(key, _)| *key == gloss)
        .map(|(_, form)| (*form).to_string())
        .unwrap_or_else(|| gloss.to_lowercase())
}
