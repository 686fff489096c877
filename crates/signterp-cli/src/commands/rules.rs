//! Implementation of the `signterp rules` command.

use miette::IntoDiagnostic;
use signterp::RuleStore;

use super::Context;
use crate::output::table::format_rules_table;

/// Arguments for the rules command.
#[derive(Debug, clap::Args)]
pub struct RulesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the rules command.
pub fn run_rules(context: &Context, args: RulesArgs) -> miette::Result<i32> {
    let catalog = match context.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };

    let rules = match catalog.load_active_rules(&context.locale) {
        Ok(rules) => rules,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exitcode::UNAVAILABLE);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rules).into_diagnostic()?);
    } else if rules.is_empty() {
        println!("No active rules for {}", context.locale);
    } else {
        println!("{}", format_rules_table(&rules));
    }

    Ok(exitcode::OK)
}
