//! kafe compiler: source frontend, code generator and class file assembler.
//!
//! Pipeline:
//! - `frontend` - lexer, parser and validation into an [`ast::Program`]
//! - `codegen` - symbol resolution and lowering of function bodies
//! - `emit` - constant pool, instruction encoding, method and class assembly
//! - `output` - atomic class file output

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod ast;
pub mod codegen;
pub mod emit;
pub mod frontend;
pub mod output;

#[cfg(test)]
mod compile_tests;
#[cfg(test)]
mod output_tests;
#[cfg(test)]
pub mod test_utils;

use std::path::PathBuf;

use kafe_classfile::{EncodeError, MAJOR_VERSION, MINOR_VERSION};

pub use codegen::{CodeGenerator, CodegenError, FunctionError};
pub use frontend::{Diagnostic, Diagnostics, parse};
pub use output::write_class_file;

/// Settings that shape the emitted class file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileOptions {
    pub major_version: u16,
    pub minor_version: u16,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            major_version: MAJOR_VERSION,
            minor_version: MINOR_VERSION,
        }
    }
}

/// Errors that can occur while compiling a source file.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("compilation failed with {} errors", .0.len())]
    Syntax(Diagnostics),

    #[error(transparent)]
    Codegen(#[from] FunctionError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Compile `source` into the bytes of class `class_name` with default options.
pub fn compile(source: &str, class_name: &str) -> Result<Vec<u8>> {
    compile_with(source, class_name, &CompileOptions::default())
}

pub fn compile_with(source: &str, class_name: &str, options: &CompileOptions) -> Result<Vec<u8>> {
    let program = parse(source).map_err(Error::Syntax)?;
    compile_program(&program, class_name, options)
}

/// Lower an already validated program. Nothing is returned unless every
/// function was generated.
pub fn compile_program(
    program: &ast::Program,
    class_name: &str,
    options: &CompileOptions,
) -> Result<Vec<u8>> {
    let generator = CodeGenerator::new(class_name, options)?;
    let assembler = generator.generate(program)?;
    Ok(assembler.write()?)
}
