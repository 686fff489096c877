//! CLI command implementations.

mod check;
mod interpret;
mod lookup;
mod rules;

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use miette::Report;
use signterp::{Catalog, LoadError};
use tracing::debug;

use crate::output::SourceDiagnostic;

pub use check::{run_check, CheckArgs};
pub use interpret::{run_interpret, InterpretArgs};
pub use lookup::{run_lookup, LookupArgs};
pub use rules::{run_rules, RulesArgs};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    pub catalog: Option<PathBuf>,
    pub locale: String,
    pub verbose: bool,
}

impl Context {
    /// Load the configured catalog.
    ///
    /// On failure the problem has already been reported and the exit code to
    /// use is returned instead.
    pub fn load_catalog(&self) -> Result<Catalog, i32> {
        let Some(path) = &self.catalog else {
            eprintln!("error: no catalog given; pass --catalog or set SIGNTERP_CATALOG");
            return Err(exitcode::USAGE);
        };

        match Catalog::load(path) {
            Ok(catalog) => {
                debug!(
                    path = %path.display(),
                    lexemes = catalog.lexeme_count(),
                    signs = catalog.sign_count(),
                    rules = catalog.rules().len(),
                    "loaded catalog"
                );
                Ok(catalog)
            }
            Err(e) => Err(report_load_error(path, e)),
        }
    }
}

/// Print a catalog load error and pick the matching exit code.
fn report_load_error(path: &Path, error: LoadError) -> i32 {
    match error {
        LoadError::Io { .. } => {
            eprintln!("error: {error}");
            exitcode::NOINPUT
        }
        LoadError::Json {
            line,
            column,
            ref message,
            ..
        } => {
            // Re-read for the source snippet; fall back to the plain message.
            match read_to_string(path) {
                Ok(content) => {
                    let name = path.display().to_string();
                    let diagnostic = SourceDiagnostic::at(&name, &content, line, column, message);
                    eprintln!("{:?}", Report::new(diagnostic));
                }
                Err(_) => eprintln!("error: {error}"),
            }
            exitcode::DATAERR
        }
        LoadError::Catalog { .. } => {
            eprintln!("error: {error}");
            exitcode::DATAERR
        }
    }
}
