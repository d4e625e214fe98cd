//! Class file emission.
//!
//! - `pool` - constant pool builder and method-ref registry
//! - `encoder` - logical op → instruction encoding
//! - `method` - per-method instruction stream
//! - `class` - top-level class assembly and serialization

mod class;
mod encoder;
mod method;
mod pool;

#[cfg(test)]
mod pool_tests;

pub use class::{ClassFileAssembler, MethodId};
pub use encoder::{InvokeKind, Op, SlotCategory, encode};
pub use method::MethodAssembler;
pub use pool::{ConstantPoolBuilder, MethodRow};
