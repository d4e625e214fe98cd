//! Human-readable class file listing, in the spirit of `javap -c -v`.
//!
//! Sections: `[class]`, `[constant_pool]`, `[methods]`. Pool references are
//! printed raw (`#3.#7`) with the resolved value as a trailing comment.

use std::fmt::Write as _;

use crate::class_file::{ClassFile, MethodInfo};
use crate::colors::Colors;
use crate::constant::{Constant, ConstantPool};
use crate::instruction::{Operand, decode_code};

pub fn dump(class: &ClassFile, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext {
        pool: &class.constant_pool,
        index_width: width_for_count(class.constant_pool.len()),
        colors,
    };

    dump_header(&mut out, class, &ctx);
    out.push('\n');
    dump_pool(&mut out, &ctx);
    out.push('\n');
    dump_methods(&mut out, class, &ctx);

    out
}

struct DumpContext<'a> {
    pool: &'a ConstantPool,
    index_width: usize,
    colors: Colors,
}

impl DumpContext<'_> {
    /// One-line rendering of what a pool entry denotes, used in comments.
    fn describe(&self, index: u16) -> String {
        let pool = self.pool;
        match pool.get(index) {
            Some(Constant::Utf8(text)) => text.escape_debug().to_string(),
            Some(Constant::Class { .. }) => pool.class_name(index).unwrap_or("?").to_owned(),
            Some(Constant::String { .. }) => {
                format!("\"{}\"", pool.string_value(index).unwrap_or("?").escape_debug())
            }
            Some(Constant::FieldRef { .. } | Constant::MethodRef { .. }) => {
                match pool.member_ref(index) {
                    Some(m) => format!("{}.{}:{}", m.class, m.name, m.descriptor),
                    None => "?".to_owned(),
                }
            }
            Some(Constant::NameAndType { .. }) => match pool.name_and_type(index) {
                Some((name, descriptor)) => format!("{name}:{descriptor}"),
                None => "?".to_owned(),
            },
            None => "<invalid>".to_owned(),
        }
    }
}

fn width_for_count(count: usize) -> usize {
    count.max(1).to_string().len()
}

fn dump_header(out: &mut String, class: &ClassFile, ctx: &DumpContext<'_>) {
    let c = &ctx.colors;
    let name = class.class_name().unwrap_or("?");
    let super_name = class.super_name().unwrap_or("?");

    writeln!(out, "[class]").unwrap();
    writeln!(out, "name     {}{}{}", c.name, name, c.reset).unwrap();
    writeln!(out, "super    {}{}{}", c.name, super_name, c.reset).unwrap();
    writeln!(
        out,
        "version  {}.{}",
        class.major_version, class.minor_version
    )
    .unwrap();
    writeln!(out, "flags    {}", class.access_flags).unwrap();
}

fn dump_pool(out: &mut String, ctx: &DumpContext<'_>) {
    let c = &ctx.colors;
    let w = ctx.index_width;

    writeln!(out, "[constant_pool]").unwrap();
    for (index, constant) in ctx.pool.iter() {
        write!(
            out,
            "{}#{:<w$}{}  {:<11} ",
            c.dim,
            index,
            c.reset,
            constant.tag().name()
        )
        .unwrap();
        match constant {
            Constant::Utf8(text) => {
                writeln!(out, "{}{}{}", c.literal, text.escape_debug(), c.reset).unwrap();
            }
            Constant::Class { name } => {
                writeln!(out, "#{} {}; {}{}", name, c.dim, ctx.describe(index), c.reset).unwrap();
            }
            Constant::String { utf8 } => {
                writeln!(out, "#{} {}; {}{}", utf8, c.dim, ctx.describe(index), c.reset).unwrap();
            }
            Constant::FieldRef {
                class,
                name_and_type,
            }
            | Constant::MethodRef {
                class,
                name_and_type,
            } => {
                writeln!(
                    out,
                    "#{}.#{} {}; {}{}",
                    class,
                    name_and_type,
                    c.dim,
                    ctx.describe(index),
                    c.reset
                )
                .unwrap();
            }
            Constant::NameAndType { name, descriptor } => {
                writeln!(
                    out,
                    "#{}:#{} {}; {}{}",
                    name,
                    descriptor,
                    c.dim,
                    ctx.describe(index),
                    c.reset
                )
                .unwrap();
            }
        }
    }
}

fn dump_methods(out: &mut String, class: &ClassFile, ctx: &DumpContext<'_>) {
    writeln!(out, "[methods]").unwrap();
    for (i, method) in class.methods.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        dump_method(out, method, ctx);
    }
}

fn dump_method(out: &mut String, method: &MethodInfo, ctx: &DumpContext<'_>) {
    let c = &ctx.colors;
    let name = ctx.pool.utf8(method.name_index).unwrap_or("?");
    let descriptor = ctx.pool.utf8(method.descriptor_index).unwrap_or("?");

    for keyword in method.access_flags.method_keywords() {
        write!(out, "{keyword} ").unwrap();
    }
    writeln!(out, "{}{}{}{}", c.name, name, c.reset, descriptor).unwrap();

    let Some(code) = &method.code else {
        return;
    };
    writeln!(
        out,
        "  stack={} locals={} code={}",
        code.max_stack,
        code.max_locals,
        code.code.len()
    )
    .unwrap();

    let instructions = match decode_code(&code.code) {
        Ok(instructions) => instructions,
        Err(e) => {
            writeln!(out, "  <undecodable: {e}>").unwrap();
            return;
        }
    };

    for (offset, instr) in instructions {
        write!(
            out,
            "  {}{:04}{}  {}{}{}",
            c.dim,
            offset,
            c.reset,
            c.opcode,
            instr.opcode.mnemonic(),
            c.reset
        )
        .unwrap();
        match instr.operand {
            Operand::None => {}
            Operand::I8(value) => write!(out, " {}{}{}", c.literal, value, c.reset).unwrap(),
            operand if instr.opcode.takes_pool_index() => {
                let index = operand.index().unwrap_or(0);
                write!(
                    out,
                    " #{} {}; {}{}",
                    index,
                    c.dim,
                    ctx.describe(index),
                    c.reset
                )
                .unwrap();
            }
            Operand::U8(slot) => write!(out, " {slot}").unwrap(),
            Operand::U16(value) => write!(out, " {value}").unwrap(),
        }
        out.push('\n');
    }
}
