//! Lowering of a validated [`Program`](crate::ast::Program) into a class.

mod error;
mod generator;
mod symbols;
mod types;

#[cfg(test)]
mod symbols_tests;

pub use error::{CodegenError, FunctionError, SymbolKind};
pub use generator::{CodeGenerator, OUT_FIELD, PRINT_STREAM_CLASS, SYSTEM_CLASS};
pub use symbols::{Local, SymbolResolver};
pub use types::{field_type, method_descriptor};
