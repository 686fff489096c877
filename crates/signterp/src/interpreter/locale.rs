//! Locale tag comparison for rule selection.

use icu_locale_core::Locale as IcuLocale;

/// Canonical BCP-47 form of a locale tag (`es-mx` -> `es-MX`).
///
/// Tags that do not parse are returned trimmed but otherwise unchanged, so
/// they still compare equal to themselves.
pub fn canonical_locale(tag: &str) -> String {
    let trimmed = tag.trim();
    match trimmed.parse::<IcuLocale>() {
        Ok(locale) => locale.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Whether a rule tagged `rule_locale` applies to `requested`. Rules with no
/// locale apply everywhere.
pub fn locale_matches(rule_locale: Option<&str>, requested: &str) -> bool {
    match rule_locale {
        None => true,
        Some(tag) => canonical_locale(tag) == canonical_locale(requested),
    }
}
