use std::fs;

use kafe_classfile::ClassFile;

use crate::cli::AstFormat;
use crate::commands::ast::{self, AstArgs};
use crate::commands::build::{self, BuildArgs};
use crate::commands::{CliError, lex};

fn build_args(dir: &tempfile::TempDir, file: &str, source: &str) -> BuildArgs {
    let input = dir.path().join(file);
    fs::write(&input, source).unwrap();
    BuildArgs {
        input,
        out_dir: dir.path().to_owned(),
        dump: false,
        javap: false,
        color: false,
    }
}

#[test]
fn build_writes_class_named_after_input() {
    let dir = tempfile::tempdir().unwrap();
    let args = build_args(&dir, "Hello.kf", "routine main is println(\"hi\"); end");

    build::run(args).unwrap();

    let bytes = fs::read(dir.path().join("Hello.class")).unwrap();
    let class = ClassFile::parse(&bytes).unwrap();
    assert_eq!(class.class_name(), Some("Hello"));
}

#[test]
fn syntax_error_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let args = build_args(&dir, "Broken.kf", "routine main is x := ; end");

    let err = build::run(args).unwrap_err();

    assert!(matches!(
        err,
        CliError::Compile(kafe_compiler::Error::Syntax(_))
    ));
    assert!(!dir.path().join("Broken.class").exists());
}

#[test]
fn codegen_error_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let args = build_args(&dir, "Wide.kf", "routine main is x: int := 999; end");

    let err = build::run(args).unwrap_err();

    assert!(matches!(
        err,
        CliError::Compile(kafe_compiler::Error::Codegen(_))
    ));
    assert!(!dir.path().join("Wide.class").exists());
}

#[test]
fn invalid_class_name_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let args = build_args(&dir, "not-a-class.kf", "routine main is end");

    assert!(matches!(build::run(args), Err(CliError::ClassName(_))));
}

#[test]
fn missing_input_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let args = BuildArgs {
        input: dir.path().join("Nope.kf"),
        out_dir: dir.path().to_owned(),
        dump: false,
        javap: false,
        color: false,
    };

    assert!(matches!(build::run(args), Err(CliError::Read { .. })));
}

#[test]
fn lex_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Lex.kf");
    fs::write(&input, "routine main is @ end").unwrap();

    let err = lex::run(lex::LexArgs { input }).unwrap_err();
    assert!(matches!(
        err,
        CliError::Compile(kafe_compiler::Error::Syntax(_))
    ));
}

#[test]
fn ast_json_accepts_valid_program() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Tree.kf");
    fs::write(&input, "routine main is end").unwrap();

    ast::run(AstArgs {
        input,
        format: AstFormat::Json,
    })
    .unwrap();
}
