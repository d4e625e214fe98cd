//! Instruction wire form: one opcode byte plus a 0/1/2-byte operand.

use crate::error::ParseError;
use crate::opcode::{Opcode, OperandKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operand {
    None,
    U8(u8),
    I8(i8),
    U16(u16),
}

impl Operand {
    fn kind(self) -> OperandKind {
        match self {
            Self::None => OperandKind::None,
            Self::U8(_) => OperandKind::U8,
            Self::I8(_) => OperandKind::I8,
            Self::U16(_) => OperandKind::U16,
        }
    }

    /// Operand as an unsigned value, for pool indices and slots.
    pub fn index(self) -> Option<u16> {
        match self {
            Self::U8(v) => Some(u16::from(v)),
            Self::U16(v) => Some(v),
            Self::None | Self::I8(_) => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Operand,
}

impl Instruction {
    /// Pair an opcode with its operand.
    ///
    /// # Panics
    /// Panics if the operand width does not match the opcode.
    pub fn new(opcode: Opcode, operand: Operand) -> Self {
        assert_eq!(
            opcode.operand_kind(),
            operand.kind(),
            "operand mismatch for {}",
            opcode.mnemonic()
        );
        Self { opcode, operand }
    }

    pub fn bare(opcode: Opcode) -> Self {
        Self::new(opcode, Operand::None)
    }

    pub fn size(&self) -> usize {
        self.opcode.size()
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.push(self.opcode as u8);
        match self.operand {
            Operand::None => {}
            Operand::U8(v) => out.push(v),
            Operand::I8(v) => out.push(v as u8),
            Operand::U16(v) => out.extend_from_slice(&v.to_be_bytes()),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.size());
        self.write_to(&mut out);
        out
    }

    /// Decode the instruction starting at `offset`.
    pub fn decode(code: &[u8], offset: usize) -> Result<Self, ParseError> {
        let byte = *code
            .get(offset)
            .ok_or(ParseError::UnexpectedEof { offset })?;
        let opcode = Opcode::from_byte(byte).ok_or(ParseError::UnknownOpcode {
            opcode: byte,
            offset,
        })?;

        let end = offset + opcode.size();
        if end > code.len() {
            return Err(ParseError::UnexpectedEof {
                offset: code.len(),
            });
        }

        let operand = match opcode.operand_kind() {
            OperandKind::None => Operand::None,
            OperandKind::U8 => Operand::U8(code[offset + 1]),
            OperandKind::I8 => Operand::I8(code[offset + 1] as i8),
            OperandKind::U16 => {
                Operand::U16(u16::from_be_bytes([code[offset + 1], code[offset + 2]]))
            }
        };
        Ok(Self { opcode, operand })
    }
}

/// Decode a whole method body into `(byte offset, instruction)` pairs.
pub fn decode_code(code: &[u8]) -> Result<Vec<(usize, Instruction)>, ParseError> {
    let mut out = Vec::new();
    let mut offset = 0;
    while offset < code.len() {
        let instr = Instruction::decode(code, offset)?;
        out.push((offset, instr));
        offset += instr.size();
    }
    Ok(out)
}
