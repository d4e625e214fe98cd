//! Class file decoding.
//!
//! Accepts the shape kafe writes plus unknown attributes, which are skipped.
//! Classes declaring fields or interfaces are rejected.

use crate::class_file::{ClassFile, Code, MethodInfo};
use crate::constant::{Constant, ConstantPool};
use crate::error::ParseError;
use crate::format::{AccessFlags, CODE_ATTRIBUTE, MAGIC};
use crate::mutf8;

/// Bytes before the constant pool: magic, minor, major, pool count.
const HEADER_SIZE: usize = 10;

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], ParseError> {
        let end = self.pos + n;
        if end > self.bytes.len() {
            return Err(ParseError::UnexpectedEof {
                offset: self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ParseError> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16, ParseError> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> Result<u32, ParseError> {
        let b = self.take(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self, ParseError> {
        if bytes.len() < HEADER_SIZE {
            return Err(ParseError::FileTooSmall(bytes.len()));
        }

        let mut cur = Cursor::new(bytes);
        if cur.u32()? != MAGIC {
            return Err(ParseError::InvalidMagic);
        }
        let minor_version = cur.u16()?;
        let major_version = cur.u16()?;
        let constant_pool = parse_pool(&mut cur)?;

        let access_flags = AccessFlags::from_bits(cur.u16()?);
        let this_class = class_index(&constant_pool, cur.u16()?)?;
        let super_class = class_index(&constant_pool, cur.u16()?)?;

        if cur.u16()? != 0 {
            return Err(ParseError::UnsupportedSection("interfaces"));
        }
        if cur.u16()? != 0 {
            return Err(ParseError::UnsupportedSection("fields"));
        }

        let method_count = cur.u16()?;
        let mut methods = Vec::with_capacity(usize::from(method_count));
        for _ in 0..method_count {
            methods.push(parse_method(&mut cur, &constant_pool)?);
        }

        let attr_count = cur.u16()?;
        for _ in 0..attr_count {
            skip_attribute(&mut cur)?;
        }

        if cur.remaining() != 0 {
            return Err(ParseError::TrailingBytes(cur.remaining()));
        }

        Ok(Self {
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            methods,
        })
    }
}

fn parse_pool(cur: &mut Cursor<'_>) -> Result<ConstantPool, ParseError> {
    let count = cur.u16()?;
    let mut pool = ConstantPool::new();

    for index in 1..count {
        let tag = cur.u8()?;
        let constant = match tag {
            1 => {
                let len = cur.u16()?;
                let raw = cur.take(usize::from(len))?;
                let text = mutf8::decode(raw).ok_or(ParseError::InvalidUtf8 { index })?;
                Constant::Utf8(text)
            }
            7 => Constant::Class { name: cur.u16()? },
            8 => Constant::String { utf8: cur.u16()? },
            9 => Constant::FieldRef {
                class: cur.u16()?,
                name_and_type: cur.u16()?,
            },
            10 => Constant::MethodRef {
                class: cur.u16()?,
                name_and_type: cur.u16()?,
            },
            12 => Constant::NameAndType {
                name: cur.u16()?,
                descriptor: cur.u16()?,
            },
            _ => return Err(ParseError::UnknownConstantTag { tag, index }),
        };
        pool.push_unchecked(constant);
    }

    // References may point forward in foreign files, so check once the table is complete.
    for (_, constant) in pool.iter() {
        for target in constant.references() {
            if pool.get(target).is_none() {
                return Err(ParseError::BadConstantIndex { index: target });
            }
        }
    }
    Ok(pool)
}

fn class_index(pool: &ConstantPool, index: u16) -> Result<u16, ParseError> {
    match pool.class_name(index) {
        Some(_) => Ok(index),
        None => Err(ParseError::BadConstantIndex { index }),
    }
}

fn utf8_index(pool: &ConstantPool, index: u16) -> Result<u16, ParseError> {
    match pool.utf8(index) {
        Some(_) => Ok(index),
        None => Err(ParseError::BadConstantIndex { index }),
    }
}

fn parse_method(cur: &mut Cursor<'_>, pool: &ConstantPool) -> Result<MethodInfo, ParseError> {
    let access_flags = AccessFlags::from_bits(cur.u16()?);
    let name_index = utf8_index(pool, cur.u16()?)?;
    let descriptor_index = utf8_index(pool, cur.u16()?)?;

    let mut code = None;
    let attr_count = cur.u16()?;
    for _ in 0..attr_count {
        let attr_name = cur.u16()?;
        let len = cur.u32()? as usize;
        if code.is_none() && pool.utf8(attr_name) == Some(CODE_ATTRIBUTE) {
            code = Some(parse_code(cur, attr_name, len)?);
        } else {
            cur.take(len)?;
        }
    }

    Ok(MethodInfo {
        access_flags,
        name_index,
        descriptor_index,
        code,
    })
}

fn parse_code(cur: &mut Cursor<'_>, name_index: u16, len: usize) -> Result<Code, ParseError> {
    let body = cur.take(len)?;
    let mut inner = Cursor::new(body);

    let max_stack = inner.u16()?;
    let max_locals = inner.u16()?;
    let code_len = inner.u32()? as usize;
    let code = inner.take(code_len)?.to_vec();

    let handlers = inner.u16()?;
    inner.take(usize::from(handlers) * 8)?;
    let attr_count = inner.u16()?;
    for _ in 0..attr_count {
        skip_attribute(&mut inner)?;
    }

    Ok(Code {
        name_index,
        max_stack,
        max_locals,
        code,
    })
}

fn skip_attribute(cur: &mut Cursor<'_>) -> Result<(), ParseError> {
    cur.u16()?;
    let len = cur.u32()? as usize;
    cur.take(len)?;
    Ok(())
}
