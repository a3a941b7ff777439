//! Numeric Values
//!
//! Integer widths, the numeric state carried by subjects, and literal parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fixed integer width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
}

impl IntWidth {
    /// Every width, signed first.
    pub const ALL: [IntWidth; 8] = [
        IntWidth::I8,
        IntWidth::I16,
        IntWidth::I32,
        IntWidth::I64,
        IntWidth::U8,
        IntWidth::U16,
        IntWidth::U32,
        IntWidth::U64,
    ];

    /// Position in [`IntWidth::ALL`].
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Brand description, e.g. `Int8`.
    pub fn brand_name(self) -> &'static str {
        match self {
            IntWidth::I8 => "Int8",
            IntWidth::I16 => "Int16",
            IntWidth::I32 => "Int32",
            IntWidth::I64 => "Int64",
            IntWidth::U8 => "UInt8",
            IntWidth::U16 => "UInt16",
            IntWidth::U32 => "UInt32",
            IntWidth::U64 => "UInt64",
        }
    }

    /// Literal suffix, e.g. `i8`.
    pub fn suffix(self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, IntWidth::I8 | IntWidth::I16 | IntWidth::I32 | IntWidth::I64)
    }

    /// Truncate `value` to this width, two's-complement style.
    pub fn wrap(self, value: i128) -> i128 {
        match self {
            IntWidth::I8 => value as i8 as i128,
            IntWidth::I16 => value as i16 as i128,
            IntWidth::I32 => value as i32 as i128,
            IntWidth::I64 => value as i64 as i128,
            IntWidth::U8 => value as u8 as i128,
            IntWidth::U16 => value as u16 as i128,
            IntWidth::U32 => value as u32 as i128,
            IntWidth::U64 => value as u64 as i128,
        }
    }

    /// Returns true if `value` is representable without wrapping.
    pub fn contains(self, value: i128) -> bool {
        self.wrap(value) == value
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// The state carried by numeric subjects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Numeric {
    Integer(i128),
    Float(f64),
}

impl Numeric {
    /// The integer payload, if any.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Numeric::Integer(v) => Some(*v),
            Numeric::Float(_) => None,
        }
    }

    /// The value as a float, promoting integers.
    pub fn as_float(&self) -> f64 {
        match self {
            Numeric::Integer(v) => *v as f64,
            Numeric::Float(v) => *v,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(v) => write!(f, "{}", v),
            Numeric::Float(v) => write!(f, "{:?}", v),
        }
    }
}

/// The kind of a literal: an integer width or a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Int(IntWidth),
    Float,
}

impl FromStr for Kind {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "f64" {
            return Ok(Kind::Float);
        }
        IntWidth::ALL
            .into_iter()
            .find(|width| width.suffix() == s)
            .map(Kind::Int)
            .ok_or_else(|| LiteralError::UnknownKind(s.to_string()))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Int(width) => write!(f, "{}", width),
            Kind::Float => f.write_str("f64"),
        }
    }
}

/// A parsed `<value>:<kind>` literal such as `100:i8` or `2.5:f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Literal {
    pub value: Numeric,
    pub kind: Kind,
}

/// Error parsing a literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("expected `<value>:<kind>`, got `{0}`")]
    MissingKind(String),

    #[error("unknown numeric kind `{0}` (expected i8..i64, u8..u64 or f64)")]
    UnknownKind(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("{value} does not fit in {width}")]
    OutOfRange { value: i128, width: IntWidth },
}

impl FromStr for Literal {
    type Err = LiteralError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, kind) = s
            .rsplit_once(':')
            .ok_or_else(|| LiteralError::MissingKind(s.to_string()))?;
        let kind: Kind = kind.parse()?;

        let value = match kind {
            Kind::Float => Numeric::Float(
                value
                    .parse()
                    .map_err(|_| LiteralError::InvalidNumber(value.to_string()))?,
            ),
            Kind::Int(width) => {
                let parsed: i128 = value
                    .parse()
                    .map_err(|_| LiteralError::InvalidNumber(value.to_string()))?;
                if !width.contains(parsed) {
                    return Err(LiteralError::OutOfRange {
                        value: parsed,
                        width,
                    });
                }
                Numeric::Integer(parsed)
            }
        };

        Ok(Literal { value, kind })
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.value, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap() {
        assert_eq!(IntWidth::I8.wrap(200), -56);
        assert_eq!(IntWidth::I8.wrap(-129), 127);
        assert_eq!(IntWidth::U8.wrap(300), 44);
        assert_eq!(IntWidth::U8.wrap(-1), 255);
        assert_eq!(IntWidth::U64.wrap(-1), u64::MAX as i128);
        assert_eq!(IntWidth::I64.wrap(i64::MAX as i128 + 1), i64::MIN as i128);
    }

    #[test]
    fn test_ordinals_follow_all() {
        for (i, width) in IntWidth::ALL.into_iter().enumerate() {
            assert_eq!(width.ordinal(), i);
        }
    }

    #[test]
    fn test_parse_literals() {
        let lit: Literal = "100:i8".parse().unwrap();
        assert_eq!(lit.value, Numeric::Integer(100));
        assert_eq!(lit.kind, Kind::Int(IntWidth::I8));

        let lit: Literal = "-2.5:f64".parse().unwrap();
        assert_eq!(lit.value, Numeric::Float(-2.5));
        assert_eq!(lit.to_string(), "-2.5:f64");

        let lit: Literal = "3:f64".parse().unwrap();
        assert_eq!(lit.to_string(), "3.0:f64");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "100".parse::<Literal>(),
            Err(LiteralError::MissingKind("100".to_string()))
        );
        assert_eq!(
            "1:i128".parse::<Literal>(),
            Err(LiteralError::UnknownKind("i128".to_string()))
        );
        assert_eq!(
            "x:i8".parse::<Literal>(),
            Err(LiteralError::InvalidNumber("x".to_string()))
        );
        assert_eq!(
            "300:u8".parse::<Literal>(),
            Err(LiteralError::OutOfRange {
                value: 300,
                width: IntWidth::U8
            })
        );
        assert_eq!(
            "-1:u8".parse::<Literal>().unwrap_err().to_string(),
            "-1 does not fit in u8"
        );
    }
}
