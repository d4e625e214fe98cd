//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use clap::error::ErrorKind;

use super::*;
use crate::commands::build::BuildArgs;

fn params(args: &[&str]) -> CompileParams {
    let m = build_cli()
        .try_get_matches_from(std::iter::once("kafe").chain(args.iter().copied()))
        .unwrap_or_else(|e| panic!("{e}"));
    CompileParams::from_matches(&m)
}

#[test]
fn defaults_build_into_current_directory() {
    let p = params(&["Hello.kf"]);
    assert_eq!(p.input, PathBuf::from("Hello.kf"));
    assert_eq!(p.mode, Mode::Build);
    assert_eq!(p.out_dir, PathBuf::from("."));
    assert!(!p.dump && !p.javap);
    assert_eq!(p.color, ColorChoice::Auto);
    assert_eq!(p.verbosity, 0);
}

#[test]
fn test_lex_selects_lex_mode() {
    assert_eq!(params(&["a.kf", "--test-lex"]).mode, Mode::Lex);
}

#[test]
fn ast_format_defaults_to_text() {
    assert_eq!(params(&["a.kf", "--ast"]).mode, Mode::Ast(AstFormat::Text));
    assert_eq!(
        params(&["a.kf", "--ast", "--ast-format", "json"]).mode,
        Mode::Ast(AstFormat::Json)
    );
}

#[test]
fn ast_format_alone_still_builds() {
    assert_eq!(params(&["a.kf", "--ast-format", "json"]).mode, Mode::Build);
}

#[test]
fn build_flags_reach_build_args() {
    let p = params(&["a.kf", "-o", "out", "--dump", "--javap", "--color", "never"]);
    let args = BuildArgs::from(&p);
    assert_eq!(args.out_dir, PathBuf::from("out"));
    assert!(args.dump);
    assert!(args.javap);
    assert!(!args.color);
}

#[test]
fn verbosity_counts_flags() {
    assert_eq!(params(&["a.kf", "-vv"]).verbosity, 2);
    assert_eq!(params(&["a.kf", "-v", "-v", "-v"]).verbosity, 3);
}

#[test]
fn missing_input_is_rejected() {
    let err = build_cli().try_get_matches_from(["kafe"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn unknown_flag_is_rejected() {
    let err = build_cli()
        .try_get_matches_from(["kafe", "a.kf", "--bogus"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn lex_and_ast_conflict() {
    let err = build_cli()
        .try_get_matches_from(["kafe", "a.kf", "--test-lex", "--ast"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
}

#[test]
fn invalid_color_value_is_rejected() {
    let err = build_cli()
        .try_get_matches_from(["kafe", "a.kf", "--color", "sometimes"])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
}
