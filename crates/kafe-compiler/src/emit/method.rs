//! Per-method instruction stream with stack and code-length accounting.

use kafe_classfile::{AccessFlags, Code, EncodeError, Instruction, MAX_CODE_LENGTH, MethodInfo};

use super::encoder::{Op, encode};
use crate::codegen::CodegenError;

/// One method under construction.
///
/// Instructions are kept in emission order. The operand stack depth is
/// tracked from each op's effect so `max_stack` is the true high-water mark.
#[derive(Debug)]
pub struct MethodAssembler {
    name: String,
    descriptor: String,
    access_flags: AccessFlags,
    name_index: u16,
    descriptor_index: u16,
    instructions: Vec<Instruction>,
    depth: u16,
    max_stack: u16,
    max_locals: u16,
}

impl MethodAssembler {
    pub fn new(
        name: &str,
        descriptor: &str,
        access_flags: AccessFlags,
        name_index: u16,
        descriptor_index: u16,
    ) -> Self {
        Self {
            name: name.to_owned(),
            descriptor: descriptor.to_owned(),
            access_flags,
            name_index,
            descriptor_index,
            instructions: Vec::new(),
            depth: 0,
            max_stack: 0,
            max_locals: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn access_flags(&self) -> AccessFlags {
        self.access_flags
    }

    pub fn emit(&mut self, op: Op) -> Result<(), CodegenError> {
        let instr = encode(&op)?;
        let (pops, pushes) = op.stack_effect();
        debug_assert!(
            self.depth >= pops,
            "stack underflow in {} at {:?}",
            self.name,
            op
        );
        self.depth = self.depth.saturating_sub(pops) + pushes;
        self.max_stack = self.max_stack.max(self.depth);
        self.instructions.push(instr);
        Ok(())
    }

    pub fn set_max_locals(&mut self, max_locals: u16) {
        self.max_locals = max_locals;
    }

    pub fn max_stack(&self) -> u16 {
        self.max_stack
    }

    pub fn max_locals(&self) -> u16 {
        self.max_locals
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Encoded length of the instruction stream in bytes.
    pub fn code_length(&self) -> usize {
        self.instructions.iter().map(Instruction::size).sum()
    }

    /// Serialize into a method entry with a `Code` attribute named by
    /// `code_name_index`.
    pub fn finish(&self, code_name_index: u16) -> Result<MethodInfo, EncodeError> {
        let length = self.code_length();
        if length > MAX_CODE_LENGTH {
            return Err(EncodeError::CodeTooLarge(length));
        }
        let mut code = Vec::with_capacity(length);
        for instr in &self.instructions {
            instr.write_to(&mut code);
        }
        Ok(MethodInfo {
            access_flags: self.access_flags,
            name_index: self.name_index,
            descriptor_index: self.descriptor_index,
            code: Some(Code {
                name_index: code_name_index,
                max_stack: self.max_stack,
                max_locals: self.max_locals,
                code,
            }),
        })
    }
}
