pub mod ast;
pub mod build;
pub mod javap;
pub mod lex;

use std::fs;
use std::path::{Path, PathBuf};

use kafe_compiler::Diagnostics;

/// Failures reported by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input file name `{}` is not a valid class name", .0.display())]
    ClassName(PathBuf),

    #[error("{0}")]
    Compile(#[from] kafe_compiler::Error),

    #[error("cannot read back the written class: {0}")]
    Reload(#[from] kafe_classfile::ParseError),

    #[error("cannot serialize syntax tree: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn load_source(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Print frontend diagnostics, one per line.
pub fn report_diagnostics(diagnostics: &Diagnostics) {
    for diagnostic in diagnostics.iter() {
        eprintln!("{diagnostic}");
    }
}

/// Unwrap a parse result, printing diagnostics on failure.
pub fn require_program(
    result: Result<kafe_compiler::ast::Program, Diagnostics>,
) -> Result<kafe_compiler::ast::Program, CliError> {
    result.map_err(|diagnostics| {
        report_diagnostics(&diagnostics);
        CliError::Compile(kafe_compiler::Error::Syntax(diagnostics))
    })
}
