//! Source types → descriptors and slot categories.

use kafe_classfile::{FieldType, MethodDescriptor};

use super::CodegenError;
use crate::ast::Type;
use crate::emit::SlotCategory;

pub const STRING_CLASS: &str = "java/lang/String";

pub fn field_type(ty: &Type) -> FieldType {
    match ty {
        Type::Bool => FieldType::Boolean,
        Type::Char => FieldType::Char,
        Type::Byte => FieldType::Byte,
        Type::Short => FieldType::Short,
        Type::Int => FieldType::Int,
        Type::Int64 => FieldType::Long,
        Type::String => FieldType::object(STRING_CLASS),
        Type::Object(class) => FieldType::object(class.as_str()),
    }
}

pub fn method_descriptor<'a>(
    params: impl IntoIterator<Item = &'a Type>,
    ret: Option<&Type>,
) -> MethodDescriptor {
    MethodDescriptor::new(params.into_iter().map(field_type).collect(), ret.map(field_type))
}

/// Slot category for values of `ty`. 64-bit values are not supported.
pub fn category(ty: &Type) -> Result<SlotCategory, CodegenError> {
    match ty {
        Type::Int64 => Err(CodegenError::unsupported("int64 values")),
        Type::String | Type::Object(_) => Ok(SlotCategory::Reference),
        _ => Ok(SlotCategory::Int),
    }
}

/// Parameter type used when passing `ty` to `PrintStream.print*`.
///
/// `byte` and `short` widen to `int`, class types to `Object`; the
/// remaining types have an exact overload.
pub fn print_param(ty: &Type) -> FieldType {
    match ty {
        Type::Byte | Type::Short | Type::Int => FieldType::Int,
        Type::Object(_) => FieldType::object("java/lang/Object"),
        other => field_type(other),
    }
}
