//! Errors raised while writing or reading class files.

/// Failures while serializing a class file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("constant pool overflow: {0} entries exceed the format limit")]
    PoolOverflow(usize),

    #[error("constant #{index} referenced before it was added")]
    DanglingReference { index: u16 },

    #[error("method body of {0} bytes exceeds the format limit")]
    CodeTooLarge(usize),

    #[error("string of {0} encoded bytes does not fit a UTF-8 constant")]
    StringTooLong(usize),

    #[error("too many {what}: {count}")]
    TooMany { what: &'static str, count: usize },
}

/// Failures while decoding a class file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("file too small: {0} bytes")]
    FileTooSmall(usize),

    #[error("invalid magic: expected 0xCAFEBABE")]
    InvalidMagic,

    #[error("unexpected end of data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("unknown constant tag {tag} at pool index {index}")]
    UnknownConstantTag { tag: u8, index: u16 },

    #[error("unknown opcode 0x{opcode:02x} at code offset {offset}")]
    UnknownOpcode { opcode: u8, offset: usize },

    #[error("bad constant index #{index}")]
    BadConstantIndex { index: u16 },

    #[error("constant #{index} is not valid modified UTF-8")]
    InvalidUtf8 { index: u16 },

    #[error("unsupported section: {0}")]
    UnsupportedSection(&'static str),

    #[error("{0} trailing bytes after class attributes")]
    TrailingBytes(usize),
}
