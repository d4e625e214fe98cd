//! Code generation errors.

use std::fmt;

use kafe_classfile::EncodeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Method,
    Field,
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Variable => "variable",
            Self::Method => "method",
            Self::Field => "field",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodegenError {
    #[error("unresolved {kind} `{name}`")]
    UnresolvedSymbol { kind: SymbolKind, name: String },

    #[error("not yet supported: {0}")]
    Unsupported(String),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("integer literal {0} does not fit in a signed byte")]
    IntegerOutOfRange(i64),

    #[error("local variable slot {0} exceeds the addressable range")]
    TooManyLocals(usize),

    #[error("function body does not end with a return")]
    MissingReturn,

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl CodegenError {
    pub(crate) fn unresolved(kind: SymbolKind, name: impl Into<String>) -> Self {
        Self::UnresolvedSymbol {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn unsupported(what: impl Into<String>) -> Self {
        Self::Unsupported(what.into())
    }

    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// A [`CodegenError`] tagged with the function being generated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("in function `{function}`: {source}")]
pub struct FunctionError {
    pub function: String,
    pub source: CodegenError,
}

impl FunctionError {
    pub fn new(function: impl Into<String>, source: CodegenError) -> Self {
        Self {
            function: function.into(),
            source,
        }
    }
}
