//! Field and method descriptors (`I`, `Ljava/lang/String;`, `(II)V`).

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    /// Internal class name with `/` separators.
    Object(String),
    Array(Box<FieldType>),
}

impl FieldType {
    pub fn object(class: impl Into<String>) -> Self {
        Self::Object(class.into())
    }

    /// Local variable and operand stack slots taken by a value of this type.
    pub fn slots(&self) -> u16 {
        match self {
            Self::Long => 2,
            _ => 1,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Object(_) | Self::Array(_))
    }

    /// Parse one field type from the front of `input`, returning the rest.
    fn parse_prefix(input: &str) -> Option<(Self, &str)> {
        let mut chars = input.chars();
        let ty = match chars.next()? {
            'Z' => Self::Boolean,
            'B' => Self::Byte,
            'C' => Self::Char,
            'S' => Self::Short,
            'I' => Self::Int,
            'J' => Self::Long,
            'L' => {
                let rest = chars.as_str();
                let end = rest.find(';')?;
                if end == 0 {
                    return None;
                }
                return Some((Self::Object(rest[..end].to_owned()), &rest[end + 1..]));
            }
            '[' => {
                let (inner, rest) = Self::parse_prefix(chars.as_str())?;
                return Some((Self::Array(Box::new(inner)), rest));
            }
            _ => return None,
        };
        Some((ty, chars.as_str()))
    }

    pub fn parse(input: &str) -> Option<Self> {
        match Self::parse_prefix(input)? {
            (ty, "") => Some(ty),
            _ => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("Z"),
            Self::Byte => f.write_str("B"),
            Self::Char => f.write_str("C"),
            Self::Short => f.write_str("S"),
            Self::Int => f.write_str("I"),
            Self::Long => f.write_str("J"),
            Self::Object(class) => write!(f, "L{class};"),
            Self::Array(inner) => write!(f, "[{inner}"),
        }
    }
}

/// Parameter list plus return type. `ret == None` means `V`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub ret: Option<FieldType>,
}

impl MethodDescriptor {
    pub fn new(params: Vec<FieldType>, ret: Option<FieldType>) -> Self {
        Self { params, ret }
    }

    pub fn parse(input: &str) -> Option<Self> {
        let mut rest = input.strip_prefix('(')?;
        let mut params = Vec::new();
        while !rest.starts_with(')') {
            let (ty, tail) = FieldType::parse_prefix(rest)?;
            params.push(ty);
            rest = tail;
        }
        let ret = match &rest[1..] {
            "V" => None,
            other => Some(FieldType::parse(other)?),
        };
        Some(Self { params, ret })
    }

    /// Slots popped for arguments, receiver excluded.
    pub fn arg_slots(&self) -> u16 {
        self.params.iter().map(FieldType::slots).sum()
    }

    pub fn return_slots(&self) -> u16 {
        self.ret.as_ref().map_or(0, FieldType::slots)
    }

    /// Parameter list without parentheses, e.g. `ILjava/lang/String;`.
    pub fn params_key(&self) -> String {
        self.params.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for param in &self.params {
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        match &self.ret {
            Some(ret) => write!(f, "{ret}"),
            None => f.write_str("V"),
        }
    }
}
