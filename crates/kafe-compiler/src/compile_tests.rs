use indoc::indoc;
use kafe_classfile::ClassFile;

use crate::ast::{Function, FunctionKind, Program, Stmt, StmtKind, Visibility};
use crate::{CompileOptions, Error, compile, compile_program, compile_with};

#[test]
fn syntax_errors_stop_before_codegen() {
    let err = compile("routine main is x: int := ; end", "Broken").unwrap_err();
    let Error::Syntax(diagnostics) = &err else {
        panic!("expected syntax error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(err.to_string(), "compilation failed with 1 errors");
}

#[test]
fn validation_errors_are_collected() {
    let err = compile(
        indoc! {"
            routine main is
                y := 1;
                z := 2;
            end
        "},
        "Broken",
    )
    .unwrap_err();
    let Error::Syntax(diagnostics) = err else {
        panic!("expected diagnostics");
    };
    let lines: Vec<String> = diagnostics.iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        [
            "line 2: undeclared variable `y`",
            "line 3: undeclared variable `z`"
        ]
    );
}

#[test]
fn codegen_error_names_the_function() {
    let err = compile("routine main is x: int := 1000; end", "Big").unwrap_err();
    assert_eq!(
        err.to_string(),
        "in function `main`: integer literal 1000 does not fit in a signed byte"
    );
}

#[test]
fn options_set_class_version() {
    let options = CompileOptions {
        major_version: 0x3D,
        minor_version: 0,
    };
    let bytes = compile_with("routine main is end", "Versioned", &options).unwrap();
    let class = ClassFile::parse(&bytes).unwrap();
    assert_eq!(class.major_version, 0x3D);
    assert_eq!(class.class_name(), Some("Versioned"));
}

#[test]
fn compiles_hand_built_program() {
    let program = Program {
        functions: vec![Function {
            name: "main".into(),
            visibility: Visibility::Public,
            kind: FunctionKind::Routine,
            params: Vec::new(),
            ret: None,
            body: vec![Stmt::new(StmtKind::Return(None), 1)],
            line: 1,
        }],
    };
    let bytes = compile_program(&program, "Built", &CompileOptions::default()).unwrap();
    let class = ClassFile::parse(&bytes).unwrap();
    let main = class.method("main", "([Ljava/lang/String;)V").unwrap();
    assert_eq!(main.code.as_ref().unwrap().code, [0xB1]);
}

#[test]
fn missing_return_in_hand_built_program() {
    let program = Program {
        functions: vec![Function {
            name: "run".into(),
            visibility: Visibility::Public,
            kind: FunctionKind::Func,
            params: Vec::new(),
            ret: None,
            body: Vec::new(),
            line: 1,
        }],
    };
    let err = compile_program(&program, "Built", &CompileOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "in function `run`: function body does not end with a return"
    );
}
