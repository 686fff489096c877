//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};
use signterp::GrammarRule;

/// Format grammar rules as an ASCII table, in the order given.
pub fn format_rules_table(rules: &[GrammarRule]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Weight", "Locale", "Pattern", "Template"]);

    for rule in rules {
        table.add_row(vec![
            rule.id.to_string(),
            rule.weight.to_string(),
            rule.locale.clone().unwrap_or_else(|| "*".to_string()),
            rule.pattern.clone(),
            rule.template.clone(),
        ]);
    }

    table
}
