//! Opcode table for the instruction subset kafe emits.

/// Width and meaning of the operand that follows an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandKind {
    None,
    /// Unsigned byte: local slot or short pool index (`ldc`).
    U8,
    /// Signed byte immediate (`bipush`).
    I8,
    /// Big-endian u16 pool index.
    U16,
}

impl OperandKind {
    pub fn width(self) -> usize {
        match self {
            Self::None => 0,
            Self::U8 | Self::I8 => 1,
            Self::U16 => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Bipush = 0x10,
    Ldc = 0x12,
    LdcW = 0x13,
    Iload = 0x15,
    Aload = 0x19,
    Iload0 = 0x1A,
    Iload1 = 0x1B,
    Iload2 = 0x1C,
    Iload3 = 0x1D,
    Aload0 = 0x2A,
    Aload1 = 0x2B,
    Aload2 = 0x2C,
    Aload3 = 0x2D,
    Istore = 0x36,
    Astore = 0x3A,
    Istore0 = 0x3B,
    Istore1 = 0x3C,
    Istore2 = 0x3D,
    Istore3 = 0x3E,
    Astore0 = 0x4B,
    Astore1 = 0x4C,
    Astore2 = 0x4D,
    Astore3 = 0x4E,
    Dup = 0x59,
    Iadd = 0x60,
    Isub = 0x64,
    Imul = 0x68,
    Idiv = 0x6C,
    Irem = 0x70,
    Ishl = 0x78,
    Ishr = 0x7A,
    Iand = 0x7E,
    Ior = 0x80,
    Ixor = 0x82,
    Return = 0xB1,
    Getstatic = 0xB2,
    Invokevirtual = 0xB6,
    Invokespecial = 0xB7,
    Invokestatic = 0xB8,
    New = 0xBB,
}

impl Opcode {
    pub fn from_byte(b: u8) -> Option<Self> {
        use Opcode::*;
        Some(match b {
            0x10 => Bipush,
            0x12 => Ldc,
            0x13 => LdcW,
            0x15 => Iload,
            0x19 => Aload,
            0x1A => Iload0,
            0x1B => Iload1,
            0x1C => Iload2,
            0x1D => Iload3,
            0x2A => Aload0,
            0x2B => Aload1,
            0x2C => Aload2,
            0x2D => Aload3,
            0x36 => Istore,
            0x3A => Astore,
            0x3B => Istore0,
            0x3C => Istore1,
            0x3D => Istore2,
            0x3E => Istore3,
            0x4B => Astore0,
            0x4C => Astore1,
            0x4D => Astore2,
            0x4E => Astore3,
            0x59 => Dup,
            0x60 => Iadd,
            0x64 => Isub,
            0x68 => Imul,
            0x6C => Idiv,
            0x70 => Irem,
            0x78 => Ishl,
            0x7A => Ishr,
            0x7E => Iand,
            0x80 => Ior,
            0x82 => Ixor,
            0xB1 => Return,
            0xB2 => Getstatic,
            0xB6 => Invokevirtual,
            0xB7 => Invokespecial,
            0xB8 => Invokestatic,
            0xBB => New,
            _ => return None,
        })
    }

    pub fn operand_kind(self) -> OperandKind {
        use Opcode::*;
        match self {
            Bipush => OperandKind::I8,
            Ldc | Iload | Aload | Istore | Astore => OperandKind::U8,
            LdcW | Getstatic | Invokevirtual | Invokespecial | Invokestatic | New => {
                OperandKind::U16
            }
            _ => OperandKind::None,
        }
    }

    /// Encoded size in bytes, opcode included.
    pub fn size(self) -> usize {
        1 + self.operand_kind().width()
    }

    /// Operand-stack effect as `(pops, pushes)`, in slots.
    ///
    /// `None` for invocations, whose effect depends on the method descriptor.
    /// `getstatic` is reported as one slot, which holds for the reference
    /// fields kafe reads.
    pub fn stack_effect(self) -> Option<(u16, u16)> {
        use Opcode::*;
        Some(match self {
            Bipush | Ldc | LdcW | Getstatic | New => (0, 1),
            Iload | Aload | Iload0 | Iload1 | Iload2 | Iload3 | Aload0 | Aload1 | Aload2
            | Aload3 => (0, 1),
            Istore | Astore | Istore0 | Istore1 | Istore2 | Istore3 | Astore0 | Astore1
            | Astore2 | Astore3 => (1, 0),
            Dup => (1, 2),
            Iadd | Isub | Imul | Idiv | Irem | Ishl | Ishr | Iand | Ior | Ixor => (2, 1),
            Return => (0, 0),
            Invokevirtual | Invokespecial | Invokestatic => return None,
        })
    }

    pub fn mnemonic(self) -> &'static str {
        use Opcode::*;
        match self {
            Bipush => "bipush",
            Ldc => "ldc",
            LdcW => "ldc_w",
            Iload => "iload",
            Aload => "aload",
            Iload0 => "iload_0",
            Iload1 => "iload_1",
            Iload2 => "iload_2",
            Iload3 => "iload_3",
            Aload0 => "aload_0",
            Aload1 => "aload_1",
            Aload2 => "aload_2",
            Aload3 => "aload_3",
            Istore => "istore",
            Astore => "astore",
            Istore0 => "istore_0",
            Istore1 => "istore_1",
            Istore2 => "istore_2",
            Istore3 => "istore_3",
            Astore0 => "astore_0",
            Astore1 => "astore_1",
            Astore2 => "astore_2",
            Astore3 => "astore_3",
            Dup => "dup",
            Iadd => "iadd",
            Isub => "isub",
            Imul => "imul",
            Idiv => "idiv",
            Irem => "irem",
            Ishl => "ishl",
            Ishr => "ishr",
            Iand => "iand",
            Ior => "ior",
            Ixor => "ixor",
            Return => "return",
            Getstatic => "getstatic",
            Invokevirtual => "invokevirtual",
            Invokespecial => "invokespecial",
            Invokestatic => "invokestatic",
            New => "new",
        }
    }

    /// True when the operand (if any) is a constant pool index.
    pub fn takes_pool_index(self) -> bool {
        use Opcode::*;
        matches!(
            self,
            Ldc | LdcW | Getstatic | Invokevirtual | Invokespecial | Invokestatic | New
        )
    }
}
