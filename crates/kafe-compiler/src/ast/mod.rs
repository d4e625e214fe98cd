//! Syntax tree handed from the frontend to the code generator.
//!
//! The tree is already validated when it reaches codegen: every variable is
//! declared before use and every void function ends in `return;`.

mod printer;

#[cfg(test)]
mod printer_tests;

use serde::Serialize;

pub use printer::print;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Program {
    pub functions: Vec<Function>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// `func` declares an instance method, `routine` a static one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Func,
    Routine,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Type {
    Bool,
    Char,
    Byte,
    Short,
    Int,
    Int64,
    String,
    /// Class type, internal name with `/` separators.
    Object(String),
}

impl Type {
    /// Types held as a 32-bit int on the operand stack.
    pub fn is_int_like(&self) -> bool {
        matches!(
            self,
            Self::Bool | Self::Char | Self::Byte | Self::Short | Self::Int
        )
    }

    /// Whether a value of type `other` may be stored where `self` is expected.
    pub fn accepts(&self, other: &Type) -> bool {
        (self.is_int_like() && other.is_int_like()) || self == other
    }

    /// Source spelling, e.g. `int` or `java.lang.Thread`.
    pub fn name(&self) -> String {
        match self {
            Self::Bool => "bool".into(),
            Self::Char => "char".into(),
            Self::Byte => "byte".into(),
            Self::Short => "short".into(),
            Self::Int => "int".into(),
            Self::Int64 => "int64".into(),
            Self::String => "string".into(),
            Self::Object(class) => class.replace('/', "."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Type,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub visibility: Visibility,
    pub kind: FunctionKind,
    pub params: Vec<Param>,
    /// `None` for void.
    pub ret: Option<Type>,
    pub body: Vec<Stmt>,
    pub line: u32,
}

impl Function {
    pub const ENTRY_POINT: &'static str = "main";

    pub fn is_entry_point(&self) -> bool {
        self.name == Self::ENTRY_POINT
    }

    /// Entry point is always static regardless of how it was declared.
    pub fn is_static(&self) -> bool {
        self.kind == FunctionKind::Routine || self.is_entry_point()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Stmt {
    pub kind: StmtKind,
    pub line: u32,
}

impl Stmt {
    pub fn new(kind: StmtKind, line: u32) -> Self {
        Self { kind, line }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum StmtKind {
    VarDecl {
        name: String,
        ty: Type,
        init: Option<Expr>,
    },
    Assign {
        name: String,
        value: Expr,
    },
    Call(Call),
    Return(Option<Expr>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Call {
    pub receiver: Option<Receiver>,
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    /// Reserved names routed to `System.out`.
    pub const PRINT_NAMES: [&'static str; 2] = ["print", "println"];

    pub fn is_print(&self) -> bool {
        self.receiver.is_none() && Self::PRINT_NAMES.contains(&self.name.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Receiver {
    This,
    Variable(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Expr {
    Int(i64),
    Str(String),
    Ident(String),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    And,
    Or,
    Xor,
    Shl,
    Shr,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::And => "&",
            Self::Or => "|",
            Self::Xor => "^",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }
}
