//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::{AstFormat, ColorChoice};
use crate::commands::ast::AstArgs;
use crate::commands::build::BuildArgs;
use crate::commands::lex::LexArgs;

/// What the invocation should produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Lex,
    Ast(AstFormat),
    Build,
}

#[derive(Debug)]
pub struct CompileParams {
    pub input: PathBuf,
    pub mode: Mode,
    pub out_dir: PathBuf,
    pub dump: bool,
    pub javap: bool,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl CompileParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let mode = if m.get_flag("test_lex") {
            Mode::Lex
        } else if m.get_flag("ast") {
            Mode::Ast(parse_ast_format(m))
        } else {
            Mode::Build
        };

        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            mode,
            out_dir: m
                .get_one::<PathBuf>("out_dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            dump: m.get_flag("dump"),
            javap: m.get_flag("javap"),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<&CompileParams> for LexArgs {
    fn from(p: &CompileParams) -> Self {
        Self {
            input: p.input.clone(),
        }
    }
}

impl From<&CompileParams> for AstArgs {
    fn from(p: &CompileParams) -> Self {
        let format = match p.mode {
            Mode::Ast(format) => format,
            _ => AstFormat::default(),
        };
        Self {
            input: p.input.clone(),
            format,
        }
    }
}

impl From<&CompileParams> for BuildArgs {
    fn from(p: &CompileParams) -> Self {
        Self {
            input: p.input.clone(),
            out_dir: p.out_dir.clone(),
            dump: p.dump,
            javap: p.javap,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_ast_format(m: &ArgMatches) -> AstFormat {
    match m.get_one::<String>("ast_format").map(|s| s.as_str()) {
        Some("json") => AstFormat::Json,
        _ => AstFormat::Text,
    }
}
