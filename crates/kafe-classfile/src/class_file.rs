//! In-memory class file and its serializer.

use crate::constant::ConstantPool;
use crate::error::EncodeError;
use crate::format::{AccessFlags, MAGIC, MAJOR_VERSION, MAX_CODE_LENGTH, MINOR_VERSION};

/// Body of a `Code` attribute. Exception table and nested attributes are
/// always empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Code {
    /// Pool index of the `"Code"` Utf8 entry.
    pub name_index: u16,
    pub max_stack: u16,
    pub max_locals: u16,
    pub code: Vec<u8>,
}

impl Code {
    /// Value of the attribute length field: everything after it.
    pub fn attribute_length(&self) -> u32 {
        // max_stack + max_locals + code_length + exception_table_length + attributes_count
        (2 + 2 + 4 + self.code.len() + 2 + 2) as u32
    }

    fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        if self.code.len() > MAX_CODE_LENGTH {
            return Err(EncodeError::CodeTooLarge(self.code.len()));
        }
        out.extend_from_slice(&self.name_index.to_be_bytes());
        out.extend_from_slice(&self.attribute_length().to_be_bytes());
        out.extend_from_slice(&self.max_stack.to_be_bytes());
        out.extend_from_slice(&self.max_locals.to_be_bytes());
        out.extend_from_slice(&(self.code.len() as u32).to_be_bytes());
        out.extend_from_slice(&self.code);
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes());
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub code: Option<Code>,
}

impl MethodInfo {
    fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.extend_from_slice(&self.access_flags.bits().to_be_bytes());
        out.extend_from_slice(&self.name_index.to_be_bytes());
        out.extend_from_slice(&self.descriptor_index.to_be_bytes());
        match &self.code {
            Some(code) => {
                out.extend_from_slice(&1u16.to_be_bytes());
                code.write_to(out)?;
            }
            None => out.extend_from_slice(&0u16.to_be_bytes()),
        }
        Ok(())
    }
}

/// A class with no fields, interfaces or class-level attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub methods: Vec<MethodInfo>,
}

impl ClassFile {
    pub fn new(constant_pool: ConstantPool, this_class: u16, super_class: u16) -> Self {
        Self {
            minor_version: MINOR_VERSION,
            major_version: MAJOR_VERSION,
            constant_pool,
            access_flags: AccessFlags::CLASS_DEFAULT,
            this_class,
            super_class,
            methods: Vec::new(),
        }
    }

    pub fn class_name(&self) -> Option<&str> {
        self.constant_pool.class_name(self.this_class)
    }

    pub fn super_name(&self) -> Option<&str> {
        self.constant_pool.class_name(self.super_class)
    }

    /// Look up a method by name and descriptor.
    pub fn method(&self, name: &str, descriptor: &str) -> Option<&MethodInfo> {
        self.methods.iter().find(|m| {
            self.constant_pool.utf8(m.name_index) == Some(name)
                && self.constant_pool.utf8(m.descriptor_index) == Some(descriptor)
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodeError> {
        let method_count =
            u16::try_from(self.methods.len()).map_err(|_| EncodeError::TooMany {
                what: "methods",
                count: self.methods.len(),
            })?;

        let mut out = Vec::with_capacity(256);
        out.extend_from_slice(&MAGIC.to_be_bytes());
        out.extend_from_slice(&self.minor_version.to_be_bytes());
        out.extend_from_slice(&self.major_version.to_be_bytes());
        self.constant_pool.write_to(&mut out)?;
        out.extend_from_slice(&self.access_flags.bits().to_be_bytes());
        out.extend_from_slice(&self.this_class.to_be_bytes());
        out.extend_from_slice(&self.super_class.to_be_bytes());
        out.extend_from_slice(&0u16.to_be_bytes()); // interfaces
        out.extend_from_slice(&0u16.to_be_bytes()); // fields
        out.extend_from_slice(&method_count.to_be_bytes());
        for method in &self.methods {
            method.write_to(&mut out)?;
        }
        out.extend_from_slice(&0u16.to_be_bytes()); // attributes
        Ok(out)
    }
}
