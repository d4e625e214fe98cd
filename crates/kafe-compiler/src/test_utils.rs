//! Test helpers: compile a snippet and inspect the generated methods.

use kafe_classfile::{ClassFile, Constant, MethodInfo, Operand, decode_code};

use crate::{Error, compile};

/// Class name used by every helper.
pub const CLASS: &str = "Test";

pub fn compile_class(source: &str) -> ClassFile {
    let bytes = compile(source, CLASS).unwrap_or_else(|e| panic!("compilation failed: {e}"));
    ClassFile::parse(&bytes).unwrap()
}

pub fn compile_error(source: &str) -> Error {
    match compile(source, CLASS) {
        Ok(_) => panic!("expected compilation to fail"),
        Err(e) => e,
    }
}

/// First method called `name`, whatever its descriptor.
pub fn method<'a>(class: &'a ClassFile, name: &str) -> &'a MethodInfo {
    class
        .methods
        .iter()
        .find(|m| class.constant_pool.utf8(m.name_index) == Some(name))
        .unwrap_or_else(|| panic!("no method `{name}`"))
}

/// Instructions of method `name`, one per entry, with pool operands resolved:
/// `getstatic java/lang/System.out`, `ldc "hi"`, `istore_1`, `bipush 7`.
pub fn listing(class: &ClassFile, name: &str) -> Vec<String> {
    let pool = &class.constant_pool;
    let code = &method(class, name).code.as_ref().unwrap().code;
    decode_code(code)
        .unwrap()
        .into_iter()
        .map(|(_, instr)| {
            let mnemonic = instr.opcode.mnemonic();
            match instr.operand {
                Operand::None => mnemonic.to_owned(),
                Operand::I8(value) => format!("{mnemonic} {value}"),
                operand if instr.opcode.takes_pool_index() => {
                    let index = operand.index().unwrap();
                    let target = match pool.get(index).unwrap() {
                        Constant::String { .. } => format!("{:?}", pool.string_value(index).unwrap()),
                        Constant::Class { .. } => pool.class_name(index).unwrap().to_owned(),
                        _ => {
                            let member = pool.member_ref(index).unwrap();
                            let descriptor = if member.descriptor.starts_with('(') {
                                member.descriptor
                            } else {
                                ""
                            };
                            format!("{}.{}{}", member.class, member.name, descriptor)
                        }
                    };
                    format!("{mnemonic} {target}")
                }
                operand => format!("{mnemonic} {}", operand.index().unwrap()),
            }
        })
        .collect()
}
