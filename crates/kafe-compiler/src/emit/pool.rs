//! Constant pool builder with semantic-key caches and the method-ref registry.

use indexmap::IndexMap;
use kafe_classfile::{Constant, ConstantPool, EncodeError};

/// One imported or declared method reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodRow {
    pub name: String,
    pub owner: String,
    pub descriptor: String,
    /// Pool index of the `Methodref` entry.
    pub index: u16,
}

/// Interns symbolic constants into a single append-only pool.
///
/// Class references, field references and string constants are cached by
/// their semantic key, so each is created once. Raw UTF-8 entries and method
/// references are not: callers cache those themselves. Method lookups take
/// the first registry row that matches, in import order.
#[derive(Debug, Default)]
pub struct ConstantPoolBuilder {
    pool: ConstantPool,
    classes: IndexMap<String, u16>,
    fields: IndexMap<String, u16>,
    strings: IndexMap<String, u16>,
    methods: Vec<MethodRow>,
}

impl ConstantPoolBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, constant: Constant) -> Result<u16, EncodeError> {
        let index = self.pool.push(constant)?;
        log::trace!("pool #{index} = {:?}", self.pool.get(index));
        Ok(index)
    }

    /// Append a new UTF-8 entry. Never deduplicates.
    pub fn intern_utf8(&mut self, text: &str) -> Result<u16, EncodeError> {
        self.push(Constant::Utf8(text.to_owned()))
    }

    /// Index of the `Class` entry for `name`, created on first use.
    pub fn import_class(&mut self, name: &str) -> Result<u16, EncodeError> {
        if let Some(&index) = self.classes.get(name) {
            return Ok(index);
        }
        let utf8 = self.intern_utf8(name)?;
        let index = self.push(Constant::Class { name: utf8 })?;
        self.classes.insert(name.to_owned(), index);
        Ok(index)
    }

    /// Append a `Methodref` and a registry row. Re-importing the same
    /// triple creates a second entry; lookups still return the first.
    pub fn import_method(
        &mut self,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<u16, EncodeError> {
        let class = self.import_class(owner)?;
        let name_index = self.intern_utf8(name)?;
        let descriptor_index = self.intern_utf8(descriptor)?;
        self.register_method(class, name_index, descriptor_index, owner, name, descriptor)
    }

    /// Build the `NameAndType` + `Methodref` pair for already-interned name
    /// and descriptor entries, and record it in the registry.
    pub fn register_method(
        &mut self,
        class: u16,
        name_index: u16,
        descriptor_index: u16,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<u16, EncodeError> {
        let name_and_type = self.push(Constant::NameAndType {
            name: name_index,
            descriptor: descriptor_index,
        })?;
        let index = self.push(Constant::MethodRef {
            class,
            name_and_type,
        })?;
        self.methods.push(MethodRow {
            name: name.to_owned(),
            owner: owner.to_owned(),
            descriptor: descriptor.to_owned(),
            index,
        });
        Ok(index)
    }

    /// Import field `name` of class `owner`, typed as an instance of
    /// `type_owner`. Cached by field name alone.
    pub fn import_field(
        &mut self,
        owner: &str,
        type_owner: &str,
        name: &str,
    ) -> Result<u16, EncodeError> {
        if let Some(&index) = self.fields.get(name) {
            return Ok(index);
        }
        let class = self.import_class(owner)?;
        self.import_class(type_owner)?;
        let descriptor = self.intern_utf8(&format!("L{type_owner};"))?;
        let name_index = self.intern_utf8(name)?;
        let name_and_type = self.push(Constant::NameAndType {
            name: name_index,
            descriptor,
        })?;
        let index = self.push(Constant::FieldRef {
            class,
            name_and_type,
        })?;
        self.fields.insert(name.to_owned(), index);
        Ok(index)
    }

    pub fn field(&self, name: &str) -> Option<u16> {
        self.fields.get(name).copied()
    }

    /// `String` constant for `value`, created on first use.
    pub fn intern_string_constant(&mut self, value: &str) -> Result<u16, EncodeError> {
        if let Some(&index) = self.strings.get(value) {
            return Ok(index);
        }
        let utf8 = self.intern_utf8(value)?;
        let index = self.push(Constant::String { utf8 })?;
        self.strings.insert(value.to_owned(), index);
        Ok(index)
    }

    /// First registry row named `name` that matches every supplied filter.
    /// `None` filters act as wildcards.
    pub fn find_method_row(
        &self,
        name: &str,
        owner: Option<&str>,
        descriptor: Option<&str>,
    ) -> Option<&MethodRow> {
        self.methods.iter().find(|row| {
            row.name == name
                && owner.is_none_or(|o| row.owner == o)
                && descriptor.is_none_or(|d| row.descriptor == d)
        })
    }

    /// Pool index of the first matching method, see [`Self::find_method_row`].
    pub fn find_method(
        &self,
        name: &str,
        owner: Option<&str>,
        descriptor: Option<&str>,
    ) -> Option<u16> {
        self.find_method_row(name, owner, descriptor)
            .map(|row| row.index)
    }

    /// First registered `owner.name descriptor`, imported if absent.
    pub fn find_or_import_method(
        &mut self,
        owner: &str,
        name: &str,
        descriptor: &str,
    ) -> Result<u16, EncodeError> {
        match self.find_method(name, Some(owner), Some(descriptor)) {
            Some(index) => Ok(index),
            None => self.import_method(owner, name, descriptor),
        }
    }

    /// Registry rows in import order.
    pub fn methods(&self) -> &[MethodRow] {
        &self.methods
    }

    pub fn pool(&self) -> &ConstantPool {
        &self.pool
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}
