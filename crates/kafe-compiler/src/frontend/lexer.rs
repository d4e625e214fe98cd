//! Lexer for kafe source.
//!
//! Tokens carry their byte span and 1-based line; text is sliced from the
//! source on demand. Consecutive unrecognized characters are coalesced into
//! one `Garbage` token so a stray run of symbols yields a single diagnostic.

use std::fmt;
use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[token("func")]
    KwFunc,
    #[token("routine")]
    KwRoutine,
    #[token("is")]
    KwIs,
    #[token("end")]
    KwEnd,
    #[token("return")]
    KwReturn,
    #[token("public")]
    KwPublic,
    #[token("protected")]
    KwProtected,
    #[token("private")]
    KwPrivate,
    #[token("this")]
    KwThis,

    #[token("int")]
    TyInt,
    #[token("bool")]
    TyBool,
    #[token("char")]
    TyChar,
    #[token("byte")]
    TyByte,
    #[token("short")]
    TyShort,
    #[token("int64")]
    TyInt64,
    #[token("string")]
    TyString,

    /// Defined after keywords so they take precedence.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Int,

    #[regex(r#""(?:[^"\\]|\\.)*""#)]
    Str,

    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,
    /// `:=` is defined before `:` for correct precedence.
    #[token(":=")]
    Assign,
    #[token(":")]
    Colon,
    #[token(".")]
    Dot,
    #[token("->")]
    Arrow,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("^")]
    Caret,
    #[token("<<")]
    Shl,
    #[token(">>")]
    Shr,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,

    /// Coalesced unrecognized characters
    Garbage,
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        self == Self::Comment
    }

    /// Human-readable description for diagnostics.
    pub fn describe(self) -> &'static str {
        use TokenKind::*;
        match self {
            KwFunc => "`func`",
            KwRoutine => "`routine`",
            KwIs => "`is`",
            KwEnd => "`end`",
            KwReturn => "`return`",
            KwPublic => "`public`",
            KwProtected => "`protected`",
            KwPrivate => "`private`",
            KwThis => "`this`",
            TyInt | TyBool | TyChar | TyByte | TyShort | TyInt64 | TyString => "type name",
            Ident => "identifier",
            Int => "integer",
            Str => "string",
            ParenOpen => "`(`",
            ParenClose => "`)`",
            Comma => "`,`",
            Semicolon => "`;`",
            Assign => "`:=`",
            Colon => "`:`",
            Dot => "`.`",
            Arrow => "`->`",
            Plus => "`+`",
            Minus => "`-`",
            Star => "`*`",
            Slash => "`/`",
            Percent => "`%`",
            Amp => "`&`",
            Pipe => "`|`",
            Caret => "`^`",
            Shl => "`<<`",
            Shr => "`>>`",
            Comment => "comment",
            Garbage => "unrecognized input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub line: u32,
}

impl Token {
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.span.clone()]
    }
}

/// Tokenize `source`, comments included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut lines = LineCounter::default();
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                let span = lexer.span();
                if let Some(start) = error_start.take() {
                    let line = lines.line_at(source, start);
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..span.start,
                        line,
                    });
                }
                let line = lines.line_at(source, span.start);
                tokens.push(Token { kind, span, line });
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    let line = lines.line_at(source, start);
                    tokens.push(Token {
                        kind: TokenKind::Garbage,
                        span: start..source.len(),
                        line,
                    });
                }
                break;
            }
        }
    }

    tokens
}

/// Incremental offset → line mapping. Offsets must be non-decreasing.
#[derive(Default)]
struct LineCounter {
    offset: usize,
    line: u32,
}

impl LineCounter {
    fn line_at(&mut self, source: &str, offset: usize) -> u32 {
        let newlines = source[self.offset..offset]
            .bytes()
            .filter(|&b| b == b'\n')
            .count();
        self.line += newlines as u32;
        self.offset = offset;
        self.line + 1
    }
}

/// Decode the body of a string literal token (quotes included in `text`).
///
/// Returns the offending escape character on failure.
pub fn unescape(text: &str) -> Result<String, char> {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(other),
            None => return Err('\\'),
        }
    }
    Ok(out)
}
