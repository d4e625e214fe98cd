//! Recursive-descent parser producing the syntax tree.
//!
//! Errors are collected, not fatal: a malformed statement is skipped up to
//! the next `;` (or the enclosing `end`), a malformed function header up to
//! its `end`.

use crate::ast::{
    BinaryOp, Call, Expr, Function, FunctionKind, Param, Program, Receiver, Stmt, StmtKind, Type,
    Visibility,
};

use super::diagnostics::Diagnostics;
use super::lexer::{Token, TokenKind, lex, unescape};

/// Parenthesized expressions deeper than this are rejected.
const MAX_DEPTH: u32 = 256;

/// Binary operators by precedence level, loosest first.
const LEVELS: [&[(TokenKind, BinaryOp)]; 6] = [
    &[(TokenKind::Pipe, BinaryOp::Or)],
    &[(TokenKind::Caret, BinaryOp::Xor)],
    &[(TokenKind::Amp, BinaryOp::And)],
    &[(TokenKind::Shl, BinaryOp::Shl), (TokenKind::Shr, BinaryOp::Shr)],
    &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
    &[
        (TokenKind::Star, BinaryOp::Mul),
        (TokenKind::Slash, BinaryOp::Div),
        (TokenKind::Percent, BinaryOp::Rem),
    ],
];

pub fn parse(source: &str) -> (Program, Diagnostics) {
    let mut diagnostics = Diagnostics::new();
    let mut tokens = Vec::new();
    for token in lex(source) {
        match token.kind {
            TokenKind::Garbage => diagnostics.error(
                token.line,
                format!("unrecognized input `{}`", token.text(source)),
            ),
            kind if kind.is_trivia() => {}
            _ => tokens.push(token),
        }
    }

    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
        diagnostics,
    };
    let program = parser.parse_program();
    (program, parser.diagnostics)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    diagnostics: Diagnostics,
}

impl Parser<'_> {
    fn current(&self) -> Option<TokenKind> {
        self.nth(0)
    }

    fn nth(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    fn eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Line of the current token, or of the last token at end of input.
    fn line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map_or(1, |t| t.line)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Option<Token> {
        if self.current() == Some(kind) {
            return self.bump();
        }
        self.error_expected(what);
        None
    }

    fn error_expected(&mut self, what: &str) {
        let line = self.line();
        let found = match self.tokens.get(self.pos) {
            Some(token) => match token.kind {
                TokenKind::Ident | TokenKind::Int => format!("`{}`", token.text(self.source)),
                kind => kind.describe().to_owned(),
            },
            None => "end of file".to_owned(),
        };
        self.diagnostics
            .error(line, format!("expected {what}, found {found}"));
    }

    fn text(&self, token: &Token) -> String {
        token.text(self.source).to_owned()
    }

    fn parse_program(&mut self) -> Program {
        let mut program = Program::default();
        while !self.eof() {
            match self.current() {
                Some(
                    TokenKind::KwPublic
                    | TokenKind::KwProtected
                    | TokenKind::KwPrivate
                    | TokenKind::KwFunc
                    | TokenKind::KwRoutine,
                ) => {
                    if let Some(function) = self.parse_function() {
                        program.functions.push(function);
                    }
                }
                _ => {
                    self.error_expected("function declaration");
                    self.synchronize_to_function_end();
                }
            }
        }
        program
    }

    /// Skip past the next `end`, or to end of input.
    fn synchronize_to_function_end(&mut self) {
        while let Some(token) = self.bump() {
            if token.kind == TokenKind::KwEnd {
                break;
            }
        }
    }

    /// Skip past the next `;`, stopping early before `end`.
    fn synchronize_to_statement_end(&mut self) {
        while let Some(kind) = self.current() {
            if kind == TokenKind::KwEnd {
                return;
            }
            self.pos += 1;
            if kind == TokenKind::Semicolon {
                return;
            }
        }
    }

    fn parse_function(&mut self) -> Option<Function> {
        let line = self.line();
        let Some((visibility, kind, name, params, ret)) = self.parse_function_header() else {
            self.synchronize_to_function_end();
            return None;
        };

        let mut body = Vec::new();
        while !self.eof() && self.current() != Some(TokenKind::KwEnd) {
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.synchronize_to_statement_end(),
            }
        }
        self.expect(TokenKind::KwEnd, &format!("`end` to close function `{name}`"))?;

        Some(Function {
            name,
            visibility,
            kind,
            params,
            ret,
            body,
            line,
        })
    }

    #[allow(clippy::type_complexity)]
    fn parse_function_header(
        &mut self,
    ) -> Option<(Visibility, FunctionKind, String, Vec<Param>, Option<Type>)> {
        let visibility = match self.current() {
            Some(TokenKind::KwPublic) => Some(Visibility::Public),
            Some(TokenKind::KwProtected) => Some(Visibility::Protected),
            Some(TokenKind::KwPrivate) => Some(Visibility::Private),
            _ => None,
        };
        if visibility.is_some() {
            self.pos += 1;
        }
        let visibility = visibility.unwrap_or_default();

        let kind = match self.current() {
            Some(TokenKind::KwFunc) => FunctionKind::Func,
            Some(TokenKind::KwRoutine) => FunctionKind::Routine,
            _ => {
                self.error_expected("`func` or `routine`");
                return None;
            }
        };
        self.pos += 1;

        let name = self.expect(TokenKind::Ident, "function name")?;
        let name = self.text(&name);

        let params = if self.eat(TokenKind::ParenOpen) {
            self.parse_params()?
        } else {
            Vec::new()
        };
        let ret = if self.eat(TokenKind::Arrow) {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect(TokenKind::KwIs, "`is`")?;

        Some((visibility, kind, name, params, ret))
    }

    /// Parameters after the opening `(`, through the closing `)`.
    fn parse_params(&mut self) -> Option<Vec<Param>> {
        let mut params = Vec::new();
        if self.eat(TokenKind::ParenClose) {
            return Some(params);
        }
        loop {
            let name = self.expect(TokenKind::Ident, "parameter name")?;
            self.expect(TokenKind::Colon, "`:`")?;
            let ty = self.parse_type()?;
            params.push(Param {
                name: self.text(&name),
                ty,
            });
            if self.eat(TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::ParenClose, "`,` or `)`")?;
            return Some(params);
        }
    }

    fn parse_type(&mut self) -> Option<Type> {
        let ty = match self.current() {
            Some(TokenKind::TyInt) => Type::Int,
            Some(TokenKind::TyBool) => Type::Bool,
            Some(TokenKind::TyChar) => Type::Char,
            Some(TokenKind::TyByte) => Type::Byte,
            Some(TokenKind::TyShort) => Type::Short,
            Some(TokenKind::TyInt64) => Type::Int64,
            Some(TokenKind::TyString) => Type::String,
            Some(TokenKind::Ident) => {
                let first = self.bump()?;
                let mut class = self.text(&first);
                while self.eat(TokenKind::Dot) {
                    let part = self.expect(TokenKind::Ident, "class name")?;
                    class.push('/');
                    class.push_str(part.text(self.source));
                }
                return Some(Type::Object(class));
            }
            _ => {
                self.error_expected("type");
                return None;
            }
        };
        self.pos += 1;
        Some(ty)
    }

    fn parse_stmt(&mut self) -> Option<Stmt> {
        let line = self.line();
        let kind = match self.current() {
            Some(TokenKind::KwReturn) => {
                self.pos += 1;
                let value = if self.current() == Some(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                StmtKind::Return(value)
            }
            Some(TokenKind::KwThis) => {
                self.pos += 1;
                self.expect(TokenKind::Dot, "`.`")?;
                StmtKind::Call(self.parse_call(Some(Receiver::This))?)
            }
            Some(TokenKind::Ident) => match self.nth(1) {
                Some(TokenKind::Colon) => {
                    let name = self.bump()?;
                    self.pos += 1;
                    let ty = self.parse_type()?;
                    let init = if self.eat(TokenKind::Assign) {
                        Some(self.parse_expr()?)
                    } else {
                        None
                    };
                    StmtKind::VarDecl {
                        name: self.text(&name),
                        ty,
                        init,
                    }
                }
                Some(TokenKind::Assign) => {
                    let name = self.bump()?;
                    self.pos += 1;
                    StmtKind::Assign {
                        name: self.text(&name),
                        value: self.parse_expr()?,
                    }
                }
                Some(TokenKind::ParenOpen) => StmtKind::Call(self.parse_call(None)?),
                Some(TokenKind::Dot) => {
                    let var = self.bump()?;
                    self.pos += 1;
                    let receiver = Receiver::Variable(self.text(&var));
                    StmtKind::Call(self.parse_call(Some(receiver))?)
                }
                _ => {
                    self.pos += 1;
                    self.error_expected("`:`, `:=`, `(` or `.`");
                    return None;
                }
            },
            _ => {
                self.error_expected("statement");
                return None;
            }
        };
        self.expect(TokenKind::Semicolon, "`;`")?;
        Some(Stmt::new(kind, line))
    }

    /// `NAME '(' args ')'`, the receiver already consumed.
    fn parse_call(&mut self, receiver: Option<Receiver>) -> Option<Call> {
        let name = self.expect(TokenKind::Ident, "method name")?;
        let name = self.text(&name);
        self.expect(TokenKind::ParenOpen, "`(`")?;

        let mut args = Vec::new();
        if !self.eat(TokenKind::ParenClose) {
            loop {
                args.push(self.parse_expr()?);
                if self.eat(TokenKind::Comma) {
                    continue;
                }
                self.expect(TokenKind::ParenClose, "`,` or `)`")?;
                break;
            }
        }
        Some(Call {
            receiver,
            name,
            args,
        })
    }

    fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_binary(0)
    }

    fn parse_binary(&mut self, level: usize) -> Option<Expr> {
        let Some(ops) = LEVELS.get(level) else {
            return self.parse_primary();
        };
        let mut lhs = self.parse_binary(level + 1)?;
        while let Some(op) = self
            .current()
            .and_then(|kind| ops.iter().find(|(k, _)| *k == kind).map(|(_, op)| *op))
        {
            self.pos += 1;
            let rhs = self.parse_binary(level + 1)?;
            lhs = Expr::binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current() {
            Some(TokenKind::Int) => {
                let token = self.bump()?;
                self.parse_int(&token, false)
            }
            Some(TokenKind::Minus) if self.nth(1) == Some(TokenKind::Int) => {
                self.pos += 1;
                let token = self.bump()?;
                self.parse_int(&token, true)
            }
            Some(TokenKind::Str) => {
                let token = self.bump()?;
                match unescape(token.text(self.source)) {
                    Ok(value) => Some(Expr::Str(value)),
                    Err(c) => {
                        self.diagnostics
                            .error(token.line, format!("unknown escape sequence `\\{c}`"));
                        None
                    }
                }
            }
            Some(TokenKind::Ident) => {
                let token = self.bump()?;
                Some(Expr::Ident(self.text(&token)))
            }
            Some(TokenKind::ParenOpen) => {
                if self.depth >= MAX_DEPTH {
                    let line = self.line();
                    self.diagnostics.error(line, "expression nested too deeply");
                    return None;
                }
                self.pos += 1;
                self.depth += 1;
                let expr = self.parse_expr();
                self.depth -= 1;
                let expr = expr?;
                self.expect(TokenKind::ParenClose, "`)`")?;
                Some(expr)
            }
            _ => {
                self.error_expected("expression");
                None
            }
        }
    }

    fn parse_int(&mut self, token: &Token, negative: bool) -> Option<Expr> {
        let text = token.text(self.source);
        let parsed = if negative {
            format!("-{text}").parse::<i64>()
        } else {
            text.parse::<i64>()
        };
        match parsed {
            Ok(value) => Some(Expr::Int(value)),
            Err(_) => {
                self.diagnostics
                    .error(token.line, format!("integer literal `{text}` is too large"));
                None
            }
        }
    }
}
