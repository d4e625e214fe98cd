//! Argument builders for the `kafe` command.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Source file to compile (positional).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("INPUT")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Source file to compile")
}

/// Print the token stream and stop (--test-lex).
pub fn test_lex_arg() -> Arg {
    Arg::new("test_lex")
        .long("test-lex")
        .action(ArgAction::SetTrue)
        .conflicts_with("ast")
        .help("Print tokens and stop")
}

/// Print the syntax tree and stop (--ast).
pub fn ast_arg() -> Arg {
    Arg::new("ast")
        .long("ast")
        .action(ArgAction::SetTrue)
        .help("Print the syntax tree and stop")
}

/// Syntax tree format (--ast-format).
pub fn ast_format_arg() -> Arg {
    Arg::new("ast_format")
        .long("ast-format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Syntax tree format for --ast")
}

/// Run `javap` on the written class (--javap).
pub fn javap_arg() -> Arg {
    Arg::new("javap")
        .long("javap")
        .action(ArgAction::SetTrue)
        .help("Disassemble the written class with javap")
}

/// Print the built-in disassembly of the written class (--dump).
pub fn dump_arg() -> Arg {
    Arg::new("dump")
        .long("dump")
        .action(ArgAction::SetTrue)
        .help("Print a disassembly of the written class")
}

/// Output directory (-o/--out-dir).
pub fn out_dir_arg() -> Arg {
    Arg::new("out_dir")
        .short('o')
        .long("out-dir")
        .value_name("DIR")
        .value_parser(value_parser!(PathBuf))
        .default_value(".")
        .help("Directory for the class file")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log more (-v info, -vv debug, -vvv trace)")
}
