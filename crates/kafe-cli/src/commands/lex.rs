use std::path::PathBuf;

use kafe_compiler::frontend::{TokenKind, lex};

use super::{CliError, load_source};

pub struct LexArgs {
    pub input: PathBuf,
}

pub fn run(args: LexArgs) -> Result<(), CliError> {
    let source = load_source(&args.input)?;
    let mut diagnostics = kafe_compiler::Diagnostics::new();
    for token in lex(&source) {
        let text = token.text(&source);
        println!("{:>4}:  {:?}  '{}'", token.line, token.kind, text.escape_debug());
        if token.kind == TokenKind::Garbage {
            diagnostics.error(token.line, format!("unrecognized input `{text}`"));
        }
    }
    if diagnostics.is_empty() {
        return Ok(());
    }
    super::report_diagnostics(&diagnostics);
    Err(kafe_compiler::Error::Syntax(diagnostics).into())
}
