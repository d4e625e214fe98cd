//! Command builder for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI.
pub fn build_cli() -> Command {
    Command::new("kafe")
        .about("Compile kafe source files to JVM class files")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(input_arg())
        .arg(test_lex_arg())
        .arg(ast_arg())
        .arg(ast_format_arg())
        .arg(dump_arg())
        .arg(javap_arg())
        .arg(out_dir_arg())
        .arg(color_arg())
        .arg(verbose_arg())
        .after_help(
            r#"EXAMPLES:
  kafe Hello.kf                  # writes ./Hello.class
  kafe Hello.kf -o build --dump  # write to build/, print disassembly
  kafe Hello.kf --test-lex       # tokens only
  kafe Hello.kf --ast --ast-format json"#,
        )
}
