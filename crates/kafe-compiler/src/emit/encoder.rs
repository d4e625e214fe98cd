//! Logical operations and their exact instruction encoding.
//!
//! Encoding is pure: it never touches the constant pool. Pool indices are
//! resolved by the caller before an [`Op`] is built.

use kafe_classfile::{Instruction, Opcode, Operand};

use crate::ast::BinaryOp;
use crate::codegen::CodegenError;

/// Which kind of value a local variable slot holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotCategory {
    Int,
    Reference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvokeKind {
    Static,
    Virtual,
    Special,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Load { category: SlotCategory, slot: u16 },
    Store { category: SlotCategory, slot: u16 },
    /// Small integer immediate.
    PushInt(i64),
    /// `String` constant at the given pool index.
    PushConstant(u16),
    New(u16),
    Dup,
    GetStatic(u16),
    Invoke {
        kind: InvokeKind,
        method: u16,
        arg_slots: u16,
        return_slots: u16,
    },
    Arith(BinaryOp),
    ReturnVoid,
}

const ILOAD_SHORT: [Opcode; 4] = [Opcode::Iload0, Opcode::Iload1, Opcode::Iload2, Opcode::Iload3];
const ALOAD_SHORT: [Opcode; 4] = [Opcode::Aload0, Opcode::Aload1, Opcode::Aload2, Opcode::Aload3];
const ISTORE_SHORT: [Opcode; 4] = [
    Opcode::Istore0,
    Opcode::Istore1,
    Opcode::Istore2,
    Opcode::Istore3,
];
const ASTORE_SHORT: [Opcode; 4] = [
    Opcode::Astore0,
    Opcode::Astore1,
    Opcode::Astore2,
    Opcode::Astore3,
];

impl Op {
    /// Operand-stack effect as `(pops, pushes)`, in slots.
    pub fn stack_effect(&self) -> (u16, u16) {
        match *self {
            Self::Load { .. } | Self::PushInt(_) | Self::PushConstant(_) => (0, 1),
            Self::New(_) | Self::GetStatic(_) => (0, 1),
            Self::Store { .. } => (1, 0),
            Self::Dup => (1, 2),
            Self::Arith(_) => (2, 1),
            Self::ReturnVoid => (0, 0),
            Self::Invoke {
                kind,
                arg_slots,
                return_slots,
                ..
            } => {
                let receiver = u16::from(kind != InvokeKind::Static);
                (arg_slots + receiver, return_slots)
            }
        }
    }
}

/// Map a logical operation to its wire instruction.
pub fn encode(op: &Op) -> Result<Instruction, CodegenError> {
    let instr = match *op {
        Op::Load { category, slot } => {
            let (short, long) = match category {
                SlotCategory::Int => (&ILOAD_SHORT, Opcode::Iload),
                SlotCategory::Reference => (&ALOAD_SHORT, Opcode::Aload),
            };
            slot_instruction(short, long, slot)?
        }
        Op::Store { category, slot } => {
            let (short, long) = match category {
                SlotCategory::Int => (&ISTORE_SHORT, Opcode::Istore),
                SlotCategory::Reference => (&ASTORE_SHORT, Opcode::Astore),
            };
            slot_instruction(short, long, slot)?
        }
        Op::PushInt(value) => {
            let byte = i8::try_from(value).map_err(|_| CodegenError::IntegerOutOfRange(value))?;
            Instruction::new(Opcode::Bipush, Operand::I8(byte))
        }
        Op::PushConstant(index) => match u8::try_from(index) {
            Ok(short) => Instruction::new(Opcode::Ldc, Operand::U8(short)),
            Err(_) => Instruction::new(Opcode::LdcW, Operand::U16(index)),
        },
        Op::New(class) => Instruction::new(Opcode::New, Operand::U16(class)),
        Op::Dup => Instruction::bare(Opcode::Dup),
        Op::GetStatic(field) => Instruction::new(Opcode::Getstatic, Operand::U16(field)),
        Op::Invoke { kind, method, .. } => {
            let opcode = match kind {
                InvokeKind::Static => Opcode::Invokestatic,
                InvokeKind::Virtual => Opcode::Invokevirtual,
                InvokeKind::Special => Opcode::Invokespecial,
            };
            Instruction::new(opcode, Operand::U16(method))
        }
        Op::Arith(op) => Instruction::bare(arith_opcode(op)),
        Op::ReturnVoid => Instruction::bare(Opcode::Return),
    };
    Ok(instr)
}

fn slot_instruction(
    short: &[Opcode; 4],
    long: Opcode,
    slot: u16,
) -> Result<Instruction, CodegenError> {
    if let Some(&opcode) = short.get(usize::from(slot)) {
        return Ok(Instruction::bare(opcode));
    }
    let byte = u8::try_from(slot).map_err(|_| CodegenError::TooManyLocals(usize::from(slot)))?;
    Ok(Instruction::new(long, Operand::U8(byte)))
}

fn arith_opcode(op: BinaryOp) -> Opcode {
    match op {
        BinaryOp::Add => Opcode::Iadd,
        BinaryOp::Sub => Opcode::Isub,
        BinaryOp::Mul => Opcode::Imul,
        BinaryOp::Div => Opcode::Idiv,
        BinaryOp::Rem => Opcode::Irem,
        BinaryOp::And => Opcode::Iand,
        BinaryOp::Or => Opcode::Ior,
        BinaryOp::Xor => Opcode::Ixor,
        BinaryOp::Shl => Opcode::Ishl,
        BinaryOp::Shr => Opcode::Ishr,
    }
}
