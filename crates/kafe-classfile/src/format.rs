//! Fixed values of the class file container.
//!
//! Layout written by [`ClassFile::to_bytes`](crate::ClassFile::to_bytes):
//! magic → minor → major → pool count → pool entries → access flags →
//! this class → super class → interfaces (0) → fields (0) → methods →
//! class attributes (0). All multi-byte fields are big-endian.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Magic number opening every class file.
pub const MAGIC: u32 = 0xCAFE_BABE;

/// Major version written by default (Java 8).
pub const MAJOR_VERSION: u16 = 0x0034;

/// Minor version written by default.
pub const MINOR_VERSION: u16 = 0;

/// Name of the method body attribute.
pub const CODE_ATTRIBUTE: &str = "Code";

/// Implicit superclass of every compiled class.
pub const OBJECT_CLASS: &str = "java/lang/Object";

/// Name shared by every instance initializer.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Descriptor of the runtime entry point (`main(String[])`).
pub const ENTRY_POINT_DESCRIPTOR: &str = "([Ljava/lang/String;)V";

/// The pool count field stores `entries + 1` in a u16.
pub const MAX_POOL_ENTRIES: usize = u16::MAX as usize - 1;

/// Upper bound on a single method's bytecode length.
pub const MAX_CODE_LENGTH: usize = u16::MAX as usize;

/// Access flags for classes and methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AccessFlags(u16);

impl AccessFlags {
    pub const NONE: Self = Self(0);
    pub const PUBLIC: Self = Self(0x0001);
    pub const PRIVATE: Self = Self(0x0002);
    pub const PROTECTED: Self = Self(0x0004);
    pub const STATIC: Self = Self(0x0008);
    pub const FINAL: Self = Self(0x0010);
    /// On classes: treat `invokespecial` with modern semantics.
    pub const SUPER: Self = Self(0x0020);

    /// Flags written for every compiled class.
    pub const CLASS_DEFAULT: Self = Self(0x0021);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Method-level keywords in declaration order, as javap prints them.
    pub fn method_keywords(self) -> Vec<&'static str> {
        let mut words = Vec::new();
        if self.contains(Self::PUBLIC) {
            words.push("public");
        }
        if self.contains(Self::PRIVATE) {
            words.push("private");
        }
        if self.contains(Self::PROTECTED) {
            words.push("protected");
        }
        if self.contains(Self::STATIC) {
            words.push("static");
        }
        if self.contains(Self::FINAL) {
            words.push("final");
        }
        words
    }
}

impl BitOr for AccessFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for AccessFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}
