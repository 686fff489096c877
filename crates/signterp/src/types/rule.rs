use bon::Builder;
use serde::{Deserialize, Serialize};

use super::Priority;

fn default_active() -> bool {
    true
}

/// A grammar rule: a part-of-speech pattern mapped to an output template.
///
/// `pattern` is a bracketed tag sequence such as `"[PRON] [VERB] [NOUN]"`;
/// `template` holds `{TAG}` and `{VERB:conj=pres,persona=1}` placeholders.
/// A rule with no locale applies to every locale.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(on(String, into))]
pub struct GrammarRule {
    pub id: u32,
    pub pattern: String,
    pub template: String,

    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default = "default_active")]
    #[builder(default = true)]
    pub active: bool,

    #[serde(default)]
    #[builder(default)]
    pub weight: i32,
}

impl GrammarRule {
    pub fn priority(&self) -> Priority {
        Priority::new(self.weight, self.id)
    }
}
