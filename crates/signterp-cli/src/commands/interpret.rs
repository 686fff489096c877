//! Implementation of the `signterp interpret` command.

use std::fs::read_to_string;
use std::io::{read_to_string as read_all, stdin};
use std::path::PathBuf;

use miette::{miette, IntoDiagnostic};
use owo_colors::OwoColorize;
use signterp::{InterpretRequest, Interpreter, Outcome, Token};

use super::Context;

/// Arguments for the interpret command.
#[derive(Debug, clap::Args)]
pub struct InterpretArgs {
    /// Sign identifiers in time order
    #[arg(conflicts_with = "request")]
    pub signs: Vec<String>,

    /// JSON request file, or `-` for stdin
    #[arg(long)]
    pub request: Option<PathBuf>,

    /// Output the response as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the interpret command.
pub fn run_interpret(context: &Context, args: InterpretArgs) -> miette::Result<i32> {
    let request = match build_request(context, &args)? {
        Ok(request) => request,
        Err(code) => return Ok(code),
    };

    if let Err(e) = request.validate() {
        eprintln!("error: invalid request: {e}");
        return Ok(exitcode::DATAERR);
    }

    let catalog = match context.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return Ok(code),
    };
    let interpreter = Interpreter::from_catalog(&catalog);

    let interpretation = match interpreter.interpret_detailed(&request) {
        Ok(interpretation) => interpretation,
        Err(e) => {
            eprintln!("error: {e}");
            return Ok(exitcode::UNAVAILABLE);
        }
    };

    if args.json {
        let output = serde_json::to_string_pretty(&interpretation.response).into_diagnostic()?;
        println!("{}", output);
    } else {
        println!("{}", interpretation.response.text);
        if context.verbose {
            eprintln!(
                "{} {:.2} ({})",
                "confidence".dimmed(),
                interpretation.response.confidence,
                describe(interpretation.outcome)
            );
        }
    }

    Ok(exitcode::OK)
}

/// Build the request from positional signs or a request document.
///
/// The outer error is for unexpected failures; the inner one is an exit
/// code for input problems that were already reported.
fn build_request(
    context: &Context,
    args: &InterpretArgs,
) -> miette::Result<Result<InterpretRequest, i32>> {
    let Some(path) = &args.request else {
        let tokens = args.signs.iter().map(Token::new).collect();
        return Ok(Ok(InterpretRequest::builder()
            .tokens(tokens)
            .locale(context.locale.clone())
            .build()));
    };

    let content = if path.as_os_str() == "-" {
        read_all(stdin())
            .into_diagnostic()
            .map_err(|e| miette!("Failed to read request from stdin: {}", e))?
    } else {
        match read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("error: cannot read request file {}: {}", path.display(), e);
                return Ok(Err(exitcode::NOINPUT));
            }
        }
    };

    // The document's own locale, or its default, applies; --locale does not
    // override a request file.
    match serde_json::from_str(&content) {
        Ok(request) => Ok(Ok(request)),
        Err(e) => {
            eprintln!("error: invalid request JSON: {e}");
            Ok(Err(exitcode::DATAERR))
        }
    }
}

fn describe(outcome: Outcome) -> String {
    match outcome {
        Outcome::Empty => "empty request".to_string(),
        Outcome::Unresolved => "no sign resolved".to_string(),
        Outcome::SingleSign => "single sign".to_string(),
        Outcome::RuleMatch { rule_id } => format!("rule {rule_id}"),
        Outcome::Concatenated => "no rule matched".to_string(),
    }
}
