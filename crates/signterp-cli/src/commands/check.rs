//! Implementation of the `signterp check` command.

use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;
use signterp::{lint_rules, RuleWarning};

use super::Context;
use crate::output::SourceDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with a non-zero code on warnings too
    #[arg(long)]
    pub strict: bool,
}

/// JSON output for one lint finding.
#[derive(Serialize)]
struct WarningJson {
    rule_id: u32,
    severity: &'static str,
    message: String,
}

/// Run the check command.
pub fn run_check(context: &Context, args: CheckArgs) -> miette::Result<i32> {
    let catalog = match context.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };

    let warnings = lint_rules(catalog.rules());
    let error_count = warnings.iter().filter(|w| w.is_error()).count();

    if args.json {
        let json_data: Vec<WarningJson> = warnings
            .iter()
            .map(|w| WarningJson {
                rule_id: w.rule_id(),
                severity: if w.is_error() { "error" } else { "warning" },
                message: w.to_string(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json_data).into_diagnostic()?);
    } else {
        for warning in &warnings {
            print_warning(warning);
        }
        let summary = format!(
            "{} rules, {} errors, {} warnings",
            catalog.rules().len(),
            error_count,
            warnings.len() - error_count
        );
        if warnings.is_empty() {
            println!("{}", summary.green());
        } else {
            println!("{}", summary);
        }
    }

    if error_count > 0 || (args.strict && !warnings.is_empty()) {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

fn print_warning(warning: &RuleWarning) {
    match warning {
        RuleWarning::InvalidPattern {
            rule_id,
            pattern,
            error,
        } => {
            let name = format!("rule {rule_id} pattern");
            let diagnostic = SourceDiagnostic::from_parse_error(&name, pattern, error);
            eprintln!("{:?}", Report::new(diagnostic));
        }
        _ => eprintln!("{} {}", "warning:".yellow().bold(), warning),
    }
}
