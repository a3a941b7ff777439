//! # Numeric Taxonomy
//!
//! The brand tree used by numeric subjects:
//!
//! ```text
//! Number
//! ├── Integer
//! │   ├── Int8  Int16  Int32  Int64    ── Signed   (union)
//! │   └── UInt8 UInt16 UInt32 UInt64   ── Unsigned (union)
//! └── Float
//! ```

use brand_dispatch::{Brand, Subject};

use crate::value::{IntWidth, Kind, Literal, Numeric};

/// Brands of the numeric taxonomy.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    pub number: Brand,
    pub integer: Brand,
    pub float: Brand,
    /// Union of the signed widths.
    pub signed: Brand,
    /// Union of the unsigned widths.
    pub unsigned: Brand,
    widths: [Brand; 8],
}

impl Taxonomy {
    /// Create a fresh set of numeric brands.
    pub fn new() -> Self {
        let number = Brand::new("Number");
        let integer = Brand::with_parent("Integer", &number);
        let float = Brand::with_parent("Float", &number);
        let widths = IntWidth::ALL.map(|width| Brand::with_parent(width.brand_name(), &integer));

        let signed = union(&widths[0], &widths[1..4]).with_description("Signed");
        let unsigned = union(&widths[4], &widths[5..]).with_description("Unsigned");

        Self {
            number,
            integer,
            float,
            signed,
            unsigned,
            widths,
        }
    }

    /// The brand of an integer width.
    pub fn width(&self, width: IntWidth) -> &Brand {
        &self.widths[width.ordinal()]
    }

    /// The brand of a literal kind.
    pub fn kind(&self, kind: Kind) -> &Brand {
        match kind {
            Kind::Int(width) => self.width(width),
            Kind::Float => &self.float,
        }
    }

    /// The integer width a subject is branded with, if any.
    pub fn width_of(&self, subject: &Subject<Numeric>) -> Option<IntWidth> {
        IntWidth::ALL
            .into_iter()
            .find(|&width| subject.carries(self.width(width)))
    }

    /// The kind a subject is branded with, if any.
    pub fn kind_of(&self, subject: &Subject<Numeric>) -> Option<Kind> {
        match self.width_of(subject) {
            Some(width) => Some(Kind::Int(width)),
            None if subject.carries(&self.float) => Some(Kind::Float),
            None => None,
        }
    }

    /// Wrap an integer in a subject branded with `width`.
    pub fn integer(&self, width: IntWidth, value: i128) -> Subject<Numeric> {
        Subject::new([self.width(width).clone()], Numeric::Integer(width.wrap(value)))
    }

    /// Wrap a float in a subject branded `Float`.
    pub fn float(&self, value: f64) -> Subject<Numeric> {
        Subject::new([self.float.clone()], Numeric::Float(value))
    }

    /// Wrap a parsed literal.
    pub fn literal(&self, literal: Literal) -> Subject<Numeric> {
        Subject::new([self.kind(literal.kind).clone()], literal.value)
    }

    /// Render a subject back into literal syntax, e.g. `-56:i8`.
    pub fn render(&self, subject: &Subject<Numeric>) -> String {
        match self.kind_of(subject) {
            Some(kind) => Literal {
                value: *subject.state(),
                kind,
            }
            .to_string(),
            None => subject.state().to_string(),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::new()
    }
}

fn union(first: &Brand, rest: &[Brand]) -> Brand {
    rest.iter().fold(first.clone(), |acc, brand| acc.or(brand))
}
