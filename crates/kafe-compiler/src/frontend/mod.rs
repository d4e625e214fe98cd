//! Source frontend: lexer, parser, validation.
//!
//! Produces a [`Program`] that satisfies the code generator's contract, or
//! the full list of line-numbered errors.

mod diagnostics;
pub mod lexer;
mod parser;
mod validate;


pub use diagnostics::{Diagnostic, Diagnostics};
pub use lexer::{Token, TokenKind, lex};

use crate::ast::Program;

/// Parse and validate `source`.
pub fn parse(source: &str) -> Result<Program, Diagnostics> {
    let (mut program, mut diagnostics) = parser::parse(source);
    if diagnostics.is_empty() {
        diagnostics.extend(validate::validate(&mut program));
    }
    if diagnostics.is_empty() {
        log::debug!("parsed {} functions", program.functions.len());
        Ok(program)
    } else {
        Err(diagnostics)
    }
}
