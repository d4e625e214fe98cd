//! Constant pool entries and the raw 1-indexed pool.
//!
//! The pool is append-only. Index 0 is never assigned; the first entry is #1.
//! An entry may only reference entries that were pushed before it, so a pool
//! built through [`ConstantPool::push`] never contains forward references.

use crate::error::EncodeError;
use crate::format::MAX_POOL_ENTRIES;
use crate::mutf8;

/// Tag byte that opens each serialized constant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConstantTag {
    Utf8 = 1,
    Class = 7,
    String = 8,
    FieldRef = 9,
    MethodRef = 10,
    NameAndType = 12,
}

impl ConstantTag {
    pub fn from_byte(b: u8) -> Option<Self> {
        Some(match b {
            1 => Self::Utf8,
            7 => Self::Class,
            8 => Self::String,
            9 => Self::FieldRef,
            10 => Self::MethodRef,
            12 => Self::NameAndType,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Utf8 => "Utf8",
            Self::Class => "Class",
            Self::String => "String",
            Self::FieldRef => "Fieldref",
            Self::MethodRef => "Methodref",
            Self::NameAndType => "NameAndType",
        }
    }
}

/// A single constant pool entry. Index fields are 1-based pool positions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Utf8(String),
    Class { name: u16 },
    String { utf8: u16 },
    FieldRef { class: u16, name_and_type: u16 },
    MethodRef { class: u16, name_and_type: u16 },
    NameAndType { name: u16, descriptor: u16 },
}

impl Constant {
    pub fn tag(&self) -> ConstantTag {
        match self {
            Self::Utf8(_) => ConstantTag::Utf8,
            Self::Class { .. } => ConstantTag::Class,
            Self::String { .. } => ConstantTag::String,
            Self::FieldRef { .. } => ConstantTag::FieldRef,
            Self::MethodRef { .. } => ConstantTag::MethodRef,
            Self::NameAndType { .. } => ConstantTag::NameAndType,
        }
    }

    /// Pool indices this entry points at.
    pub fn references(&self) -> Vec<u16> {
        match *self {
            Self::Utf8(_) => Vec::new(),
            Self::Class { name } => vec![name],
            Self::String { utf8 } => vec![utf8],
            Self::FieldRef {
                class,
                name_and_type,
            }
            | Self::MethodRef {
                class,
                name_and_type,
            } => vec![class, name_and_type],
            Self::NameAndType { name, descriptor } => vec![name, descriptor],
        }
    }

    /// Append the wire form (tag + payload) to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        out.push(self.tag() as u8);
        match self {
            Self::Utf8(text) => {
                let bytes = mutf8::encode(text);
                let len =
                    u16::try_from(bytes.len()).map_err(|_| EncodeError::StringTooLong(bytes.len()))?;
                out.extend_from_slice(&len.to_be_bytes());
                out.extend_from_slice(&bytes);
            }
            Self::Class { name } => out.extend_from_slice(&name.to_be_bytes()),
            Self::String { utf8 } => out.extend_from_slice(&utf8.to_be_bytes()),
            Self::FieldRef {
                class,
                name_and_type,
            }
            | Self::MethodRef {
                class,
                name_and_type,
            } => {
                out.extend_from_slice(&class.to_be_bytes());
                out.extend_from_slice(&name_and_type.to_be_bytes());
            }
            Self::NameAndType { name, descriptor } => {
                out.extend_from_slice(&name.to_be_bytes());
                out.extend_from_slice(&descriptor.to_be_bytes());
            }
        }
        Ok(())
    }
}

/// A resolved field or method reference, borrowed from the pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MemberRef<'a> {
    pub class: &'a str,
    pub name: &'a str,
    pub descriptor: &'a str,
}

/// Ordered, 1-indexed table of constants.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstantPool {
    entries: Vec<Constant>,
}

impl ConstantPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its 1-based index.
    ///
    /// Fails if the entry references an index not yet present or if the
    /// pool is full.
    pub fn push(&mut self, constant: Constant) -> Result<u16, EncodeError> {
        if self.entries.len() >= MAX_POOL_ENTRIES {
            return Err(EncodeError::PoolOverflow(self.entries.len() + 1));
        }
        for index in constant.references() {
            if index == 0 || usize::from(index) > self.entries.len() {
                return Err(EncodeError::DanglingReference { index });
            }
        }
        self.entries.push(constant);
        Ok(self.entries.len() as u16)
    }

    /// Append without reference checks. Used by the reader, which validates
    /// the whole table once every entry is known.
    pub(crate) fn push_unchecked(&mut self, constant: Constant) {
        self.entries.push(constant);
    }

    pub fn get(&self, index: u16) -> Option<&Constant> {
        let slot = usize::from(index).checked_sub(1)?;
        self.entries.get(slot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries with their 1-based indices.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &Constant)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, c)| ((i + 1) as u16, c))
    }

    pub fn utf8(&self, index: u16) -> Option<&str> {
        match self.get(index)? {
            Constant::Utf8(text) => Some(text),
            _ => None,
        }
    }

    pub fn class_name(&self, index: u16) -> Option<&str> {
        match self.get(index)? {
            Constant::Class { name } => self.utf8(*name),
            _ => None,
        }
    }

    pub fn string_value(&self, index: u16) -> Option<&str> {
        match self.get(index)? {
            Constant::String { utf8 } => self.utf8(*utf8),
            _ => None,
        }
    }

    pub fn name_and_type(&self, index: u16) -> Option<(&str, &str)> {
        match self.get(index)? {
            Constant::NameAndType { name, descriptor } => {
                Some((self.utf8(*name)?, self.utf8(*descriptor)?))
            }
            _ => None,
        }
    }

    /// Resolve a `FieldRef` or `MethodRef` entry.
    pub fn member_ref(&self, index: u16) -> Option<MemberRef<'_>> {
        let (class, name_and_type) = match self.get(index)? {
            Constant::FieldRef {
                class,
                name_and_type,
            }
            | Constant::MethodRef {
                class,
                name_and_type,
            } => (*class, *name_and_type),
            _ => return None,
        };
        let (name, descriptor) = self.name_and_type(name_and_type)?;
        Some(MemberRef {
            class: self.class_name(class)?,
            name,
            descriptor,
        })
    }

    /// Write the count field (`len + 1`) followed by every entry.
    pub fn write_to(&self, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        let count = u16::try_from(self.entries.len() + 1)
            .map_err(|_| EncodeError::PoolOverflow(self.entries.len()))?;
        out.extend_from_slice(&count.to_be_bytes());
        for entry in &self.entries {
            entry.write_to(out)?;
        }
        Ok(())
    }
}
