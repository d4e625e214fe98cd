use std::path::PathBuf;

use crate::cli::AstFormat;

use super::{CliError, load_source, require_program};

pub struct AstArgs {
    pub input: PathBuf,
    pub format: AstFormat,
}

pub fn run(args: AstArgs) -> Result<(), CliError> {
    let source = load_source(&args.input)?;
    let program = require_program(kafe_compiler::parse(&source))?;
    match args.format {
        AstFormat::Text => print!("{}", kafe_compiler::ast::print(&program)),
        AstFormat::Json => println!("{}", serde_json::to_string_pretty(&program)?),
    }
    Ok(())
}
