//! Implementation of the `signterp lookup` command.

use miette::IntoDiagnostic;
use owo_colors::OwoColorize;
use serde::Serialize;
use signterp::{LexicalCandidate, LexiconResolver};

use super::Context;

/// Arguments for the lookup command.
#[derive(Debug, clap::Args)]
pub struct LookupArgs {
    /// Sign identifiers to resolve
    #[arg(required = true)]
    pub signs: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one resolved sign.
#[derive(Serialize)]
struct LookupJson<'a> {
    sign_id: &'a str,
    candidates: Vec<LexicalCandidate>,
}

/// Run the lookup command.
pub fn run_lookup(context: &Context, args: LookupArgs) -> miette::Result<i32> {
    let catalog = match context.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };

    let mut results = Vec::with_capacity(args.signs.len());
    for sign_id in &args.signs {
        match catalog.resolve(sign_id) {
            Ok(candidates) => results.push(LookupJson {
                sign_id,
                candidates,
            }),
            Err(e) => {
                eprintln!("error: {e}");
                return Ok(exitcode::UNAVAILABLE);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?);
        return Ok(exitcode::OK);
    }

    for result in &results {
        println!("{}", result.sign_id.bold());
        for (rank, candidate) in result.candidates.iter().enumerate() {
            let surface = candidate
                .surface
                .as_deref()
                .map(|s| format!(" \"{s}\""))
                .unwrap_or_default();
            println!(
                "  {}. {} {}{}",
                rank + 1,
                candidate.gloss,
                format!("[{}]", candidate.pos).cyan(),
                surface
            );
        }
    }

    Ok(exitcode::OK)
}
