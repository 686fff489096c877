//! signterp CLI entry point.
//!
//! Provides command-line tools for working with sign interpretation catalogs:
//! - `signterp interpret` - Interpret a sequence of sign identifiers
//! - `signterp lookup` - Show how signs resolve to lexical items
//! - `signterp rules` - List the active grammar rules for a locale
//! - `signterp check` - Validate a catalog and lint its rules

mod commands;
mod output;

use std::io::stderr;
use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_interpret, run_lookup, run_rules, CheckArgs, Context, InterpretArgs,
    LookupArgs, RulesArgs,
};
use signterp::DEFAULT_LOCALE;
use tracing_subscriber::EnvFilter;

/// Sign language interpretation tools.
#[derive(Debug, Parser)]
#[command(name = "signterp")]
#[command(about = "Sign language interpretation tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Catalog file (.json) with lexemes, sign mappings and rules
    #[arg(long, env = "SIGNTERP_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Locale used to select grammar rules
    #[arg(long, env = "SIGNTERP_LOCALE", default_value = DEFAULT_LOCALE, global = true)]
    pub locale: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interpret sign identifiers or a JSON request
    Interpret(InterpretArgs),
    /// Show the candidates each sign resolves to
    Lookup(LookupArgs),
    /// List active grammar rules in priority order
    Rules(RulesArgs),
    /// Load the catalog and lint its grammar rules
    Check(CheckArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Install the log subscriber. `RUST_LOG` wins over the verbosity flags.
fn setup_logging(cli: &Cli) {
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .with_ansi(!matches!(cli.color, ColorWhen::Never))
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(&cli);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let context = Context {
        catalog: cli.catalog,
        locale: cli.locale,
        verbose: cli.verbose,
    };

    let result = match cli.command {
        Commands::Interpret(args) => run_interpret(&context, args),
        Commands::Lookup(args) => run_lookup(&context, args),
        Commands::Rules(args) => run_rules(&context, args),
        Commands::Check(args) => run_check(&context, args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
