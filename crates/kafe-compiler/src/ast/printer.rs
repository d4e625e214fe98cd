//! Indented text rendering of the syntax tree, for `--ast`.

use std::fmt::Write as _;

use super::{Call, Expr, Function, FunctionKind, Program, Receiver, Stmt, StmtKind};

pub fn print(program: &Program) -> String {
    let mut out = String::new();
    writeln!(out, "Program").unwrap();
    for function in &program.functions {
        print_function(&mut out, function);
    }
    out
}

fn print_function(out: &mut String, function: &Function) {
    let kind = match function.kind {
        FunctionKind::Func => "func",
        FunctionKind::Routine => "routine",
    };
    let params = function
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty.name()))
        .collect::<Vec<_>>()
        .join(", ");
    let ret = function
        .ret
        .as_ref()
        .map_or_else(|| "void".to_owned(), |t| t.name());
    writeln!(
        out,
        "  {} {} {}({}) -> {}",
        function.visibility.as_str(),
        kind,
        function.name,
        params,
        ret
    )
    .unwrap();

    for stmt in &function.body {
        print_stmt(out, stmt, 2);
    }
}

fn print_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    let pad = "  ".repeat(depth);
    match &stmt.kind {
        StmtKind::VarDecl { name, ty, init } => {
            writeln!(out, "{pad}VarDecl {name}: {}", ty.name()).unwrap();
            if let Some(init) = init {
                print_expr(out, init, depth + 1);
            }
        }
        StmtKind::Assign { name, value } => {
            writeln!(out, "{pad}Assign {name}").unwrap();
            print_expr(out, value, depth + 1);
        }
        StmtKind::Call(call) => print_call(out, call, depth),
        StmtKind::Return(value) => {
            writeln!(out, "{pad}Return").unwrap();
            if let Some(value) = value {
                print_expr(out, value, depth + 1);
            }
        }
    }
}

fn print_call(out: &mut String, call: &Call, depth: usize) {
    let pad = "  ".repeat(depth);
    match &call.receiver {
        None => writeln!(out, "{pad}Call {}", call.name).unwrap(),
        Some(Receiver::This) => writeln!(out, "{pad}Call this.{}", call.name).unwrap(),
        Some(Receiver::Variable(var)) => writeln!(out, "{pad}Call {var}.{}", call.name).unwrap(),
    }
    for arg in &call.args {
        print_expr(out, arg, depth + 1);
    }
}

fn print_expr(out: &mut String, expr: &Expr, depth: usize) {
    let pad = "  ".repeat(depth);
    match expr {
        Expr::Int(value) => writeln!(out, "{pad}Int {value}").unwrap(),
        Expr::Str(value) => writeln!(out, "{pad}Str {value:?}").unwrap(),
        Expr::Ident(name) => writeln!(out, "{pad}Ident {name}").unwrap(),
        Expr::Binary { op, lhs, rhs } => {
            writeln!(out, "{pad}Binary {}", op.symbol()).unwrap();
            print_expr(out, lhs, depth + 1);
            print_expr(out, rhs, depth + 1);
        }
    }
}
