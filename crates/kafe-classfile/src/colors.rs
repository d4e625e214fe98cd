//! ANSI styling for disassembly output.
//!
//! - `name`: class, method and member names
//! - `literal`: string and integer constants
//! - `opcode`: instruction mnemonics
//! - `dim`: offsets, pool indices and trailing comments

/// Escape sequences used by [`dump`](crate::dump). Empty strings when off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub name: &'static str,
    pub literal: &'static str,
    pub opcode: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::PLAIN
    }
}

impl Colors {
    pub const ANSI: Self = Self {
        name: "\x1b[34m",
        literal: "\x1b[32m",
        opcode: "\x1b[33m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const PLAIN: Self = Self {
        name: "",
        literal: "",
        opcode: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ANSI } else { Self::PLAIN }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
