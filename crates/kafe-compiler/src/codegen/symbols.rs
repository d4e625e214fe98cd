//! Per-function symbol table: local slots and object classes.

use indexmap::IndexMap;

use super::error::{CodegenError, SymbolKind};
use super::types::category;
use crate::ast::Type;
use crate::emit::SlotCategory;

/// Name used for the receiver in member calls.
pub const THIS: &str = "this";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Local {
    pub slot: u16,
    pub ty: Type,
    pub category: SlotCategory,
}

/// Slot allocation for one function body.
///
/// All locals share the frame's single slot counter. Instance methods
/// reserve slot 0 for the receiver; parameters follow, then declared locals
/// in declaration order. Created fresh for every function.
#[derive(Debug)]
pub struct SymbolResolver {
    class_name: String,
    is_static: bool,
    locals: IndexMap<String, Local>,
    next_slot: u16,
}

impl SymbolResolver {
    pub fn new(class_name: &str, is_static: bool) -> Self {
        Self {
            class_name: class_name.to_owned(),
            is_static,
            locals: IndexMap::new(),
            next_slot: u16::from(!is_static),
        }
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    /// Reserve one reference slot with no name, e.g. `main`'s `String[]`.
    pub fn reserve_anonymous(&mut self) -> u16 {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    /// Allocate the next slot for `name` and record its type.
    pub fn declare_local(&mut self, name: &str, ty: &Type) -> Result<u16, CodegenError> {
        let category = category(ty)?;
        if self.locals.contains_key(name) {
            return Err(CodegenError::unsupported(format!(
                "redeclaration of `{name}`"
            )));
        }
        let slot = self.next_slot;
        if usize::from(slot) > usize::from(u8::MAX) {
            return Err(CodegenError::TooManyLocals(usize::from(slot)));
        }
        self.next_slot += 1;
        self.locals.insert(
            name.to_owned(),
            Local {
                slot,
                ty: ty.clone(),
                category,
            },
        );
        Ok(slot)
    }

    /// Allocate a reference slot for an instance of `class_name`.
    pub fn declare_object_local(&mut self, name: &str, class_name: &str) -> Result<u16, CodegenError> {
        self.declare_local(name, &Type::Object(class_name.to_owned()))
    }

    pub fn local(&self, name: &str) -> Result<&Local, CodegenError> {
        self.locals
            .get(name)
            .ok_or_else(|| CodegenError::unresolved(SymbolKind::Variable, name))
    }

    /// Slot of `name`, which must hold a `category` value.
    pub fn slot_of(&self, name: &str, category: SlotCategory) -> Result<u16, CodegenError> {
        let local = self.local(name)?;
        if local.category != category {
            return Err(CodegenError::mismatch(
                category_name(category),
                local.ty.name(),
            ));
        }
        Ok(local.slot)
    }

    /// Declared class and slot of an object variable. `this` is the class
    /// being compiled, in slot 0.
    pub fn class_of(&self, name: &str) -> Result<(&str, u16), CodegenError> {
        if name == THIS {
            if self.is_static {
                return Err(CodegenError::unsupported("`this` in a static function"));
            }
            return Ok((&self.class_name, 0));
        }
        let local = self.local(name)?;
        match &local.ty {
            Type::Object(class) => Ok((class, local.slot)),
            other => Err(CodegenError::mismatch("object", other.name())),
        }
    }

    /// Number of slots used so far, receiver and parameters included.
    pub fn max_locals(&self) -> u16 {
        self.next_slot
    }
}

fn category_name(category: SlotCategory) -> &'static str {
    match category {
        SlotCategory::Int => "int",
        SlotCategory::Reference => "reference",
    }
}
