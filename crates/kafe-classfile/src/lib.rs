//! Class file format layer for kafe.
//!
//! This crate contains:
//! - Format constants (magic, versions, access flags, constant tags)
//! - Constant pool entries and the raw 1-indexed pool
//! - Opcode table and instruction wire encoding/decoding
//! - Class file structures with a serializer and a reader
//! - Human-readable disassembly (`dump`)
//!
//! It knows nothing about the source language; the compiler crate builds
//! these structures and this crate turns them into bytes and back.

mod class_file;
mod colors;
mod constant;
mod descriptor;
mod dump;
mod error;
mod format;
mod instruction;
mod mutf8;
mod opcode;
mod reader;

#[cfg(test)]
mod class_file_tests;
#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod mutf8_tests;
#[cfg(test)]
mod reader_tests;

pub use class_file::{ClassFile, Code, MethodInfo};
pub use colors::Colors;
pub use constant::{Constant, ConstantPool, ConstantTag, MemberRef};
pub use descriptor::{FieldType, MethodDescriptor};
pub use dump::dump;
pub use error::{EncodeError, ParseError};
pub use format::{
    AccessFlags, CODE_ATTRIBUTE, CONSTRUCTOR_NAME, ENTRY_POINT_DESCRIPTOR, MAGIC, MAJOR_VERSION,
    MAX_CODE_LENGTH, MAX_POOL_ENTRIES, MINOR_VERSION, OBJECT_CLASS,
};
pub use instruction::{Instruction, Operand, decode_code};
pub use opcode::{Opcode, OperandKind};
