mod cli;
mod commands;
mod util;

#[cfg(test)]
mod build_tests;
#[cfg(test)]
mod util_tests;

use clap::error::ErrorKind;

use cli::{CompileParams, Mode, build_cli};

fn main() {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    let params = CompileParams::from_matches(&matches);
    util::init_logging(params.verbosity);

    let result = match params.mode {
        Mode::Lex => commands::lex::run((&params).into()),
        Mode::Ast(_) => commands::ast::run((&params).into()),
        Mode::Build => commands::build::run((&params).into()),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
