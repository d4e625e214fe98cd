//! Checks that turn a parsed program into one the code generator accepts.
//!
//! Also completes void functions with an implicit trailing `return;`.

use std::collections::HashSet;

use indexmap::IndexSet;

use crate::ast::{Call, Expr, Function, Program, Receiver, Stmt, StmtKind, Type};

use super::diagnostics::Diagnostics;

pub fn validate(program: &mut Program) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();
    let mut signatures: HashSet<(String, Vec<Type>)> = HashSet::new();

    for function in &mut program.functions {
        check_signature(function, &mut diagnostics);

        let key = (
            function.name.clone(),
            function.params.iter().map(|p| p.ty.clone()).collect(),
        );
        if !signatures.insert(key) {
            diagnostics.error(
                function.line,
                format!(
                    "function `{}` is already defined with the same parameters",
                    function.name
                ),
            );
        }

        check_body(function, &mut diagnostics);
        complete_returns(function, &mut diagnostics);
    }

    diagnostics
}

fn check_signature(function: &Function, diagnostics: &mut Diagnostics) {
    if Call::PRINT_NAMES.contains(&function.name.as_str()) {
        diagnostics.error(
            function.line,
            format!("`{}` is reserved for console output", function.name),
        );
    }
    if function.is_entry_point() {
        if !function.params.is_empty() {
            diagnostics.error(function.line, "`main` takes no parameters");
        }
        if function.ret.is_some() {
            diagnostics.error(function.line, "`main` cannot return a value");
        }
    }
}

/// Locals of one function body: declared names, and those holding a value.
#[derive(Default)]
struct Scope<'a> {
    declared: IndexSet<&'a str>,
    assigned: HashSet<&'a str>,
}

impl<'a> Scope<'a> {
    fn declare(&mut self, name: &'a str, assigned: bool) -> bool {
        if assigned {
            self.assigned.insert(name);
        }
        self.declared.insert(name)
    }
}

/// Declaration-before-use and assignment-before-read, in statement order.
fn check_body(function: &Function, diagnostics: &mut Diagnostics) {
    let mut scope = Scope::default();
    for param in &function.params {
        if !scope.declare(&param.name, true) {
            diagnostics.error(
                function.line,
                format!("parameter `{}` is declared twice", param.name),
            );
        }
    }

    for stmt in &function.body {
        let line = stmt.line;
        match &stmt.kind {
            StmtKind::VarDecl { name, ty, init } => {
                if let Some(init) = init {
                    check_expr(init, &scope, line, diagnostics);
                }
                // Object declarations construct their instance in place.
                let assigned = init.is_some() || matches!(ty, Type::Object(_));
                if !scope.declare(name, assigned) {
                    diagnostics.error(line, format!("variable `{name}` is already declared"));
                }
            }
            StmtKind::Assign { name, value } => {
                check_expr(value, &scope, line, diagnostics);
                if check_declared(name, &scope, line, diagnostics) {
                    scope.assigned.insert(name);
                }
            }
            StmtKind::Call(call) => {
                match &call.receiver {
                    Some(Receiver::Variable(var)) => {
                        check_declared(var, &scope, line, diagnostics);
                    }
                    Some(Receiver::This) if function.is_static() => diagnostics.error(
                        line,
                        format!("`this` is not available in static function `{}`", function.name),
                    ),
                    _ => {}
                }
                for arg in &call.args {
                    check_expr(arg, &scope, line, diagnostics);
                }
            }
            StmtKind::Return(Some(value)) => check_expr(value, &scope, line, diagnostics),
            StmtKind::Return(None) => {}
        }
    }
}

fn check_expr(expr: &Expr, scope: &Scope<'_>, line: u32, diagnostics: &mut Diagnostics) {
    match expr {
        Expr::Int(_) | Expr::Str(_) => {}
        Expr::Ident(name) => {
            if check_declared(name, scope, line, diagnostics)
                && !scope.assigned.contains(name.as_str())
            {
                diagnostics.error(
                    line,
                    format!("variable `{name}` is used before it is assigned"),
                );
            }
        }
        Expr::Binary { lhs, rhs, .. } => {
            check_expr(lhs, scope, line, diagnostics);
            check_expr(rhs, scope, line, diagnostics);
        }
    }
}

fn check_declared(
    name: &str,
    scope: &Scope<'_>,
    line: u32,
    diagnostics: &mut Diagnostics,
) -> bool {
    let declared = scope.declared.contains(name);
    if !declared {
        diagnostics.error(line, format!("undeclared variable `{name}`"));
    }
    declared
}

/// Return placement: exactly one, last, matching the declared return type.
fn complete_returns(function: &mut Function, diagnostics: &mut Diagnostics) {
    let last = function.body.len().saturating_sub(1);
    for (i, stmt) in function.body.iter().enumerate() {
        let StmtKind::Return(value) = &stmt.kind else {
            continue;
        };
        if i != last {
            diagnostics.error(function.body[i + 1].line, "unreachable statement after `return`");
        }
        match (&function.ret, value) {
            (None, Some(_)) => {
                diagnostics.error(stmt.line, "cannot return a value from a void function")
            }
            (Some(ty), None) => diagnostics.error(
                stmt.line,
                format!("missing return value in function returning `{}`", ty.name()),
            ),
            _ => {}
        }
    }

    let ends_in_return = matches!(
        function.body.last(),
        Some(Stmt {
            kind: StmtKind::Return(_),
            ..
        })
    );
    if ends_in_return {
        return;
    }
    match &function.ret {
        None => {
            let line = function.body.last().map_or(function.line, |s| s.line);
            function.body.push(Stmt::new(StmtKind::Return(None), line));
        }
        Some(_) => diagnostics.error(
            function.line,
            format!("function `{}` must end with a return statement", function.name),
        ),
    }
}
