//! The runtime value model: one concrete Solid value.

use std::fmt;

/// A concrete Solid runtime value, as carried by unit types and constant
/// folding.
#[derive(Clone, Debug)]
pub enum SolidObject {
    Null,
    Boolean(bool),
    Int16(i16),
    Float64(f64),
    Str(String),
}

impl SolidObject {
    /// Value identity. Floats compare bitwise, so `NaN` is identical to
    /// itself and `0.0` is distinct from `-0.0`.
    pub fn identical(&self, other: &SolidObject) -> bool {
        match (self, other) {
            (SolidObject::Null, SolidObject::Null) => true,
            (SolidObject::Boolean(a), SolidObject::Boolean(b)) => a == b,
            (SolidObject::Int16(a), SolidObject::Int16(b)) => a == b,
            (SolidObject::Float64(a), SolidObject::Float64(b)) => a.to_bits() == b.to_bits(),
            (SolidObject::Str(a), SolidObject::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// Equality is [`identical`](SolidObject::identical): bitwise for floats.
impl PartialEq for SolidObject {
    fn eq(&self, other: &Self) -> bool {
        self.identical(other)
    }
}

impl Eq for SolidObject {}

impl fmt::Display for SolidObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolidObject::Null => f.write_str("null"),
            SolidObject::Boolean(b) => write!(f, "{b}"),
            SolidObject::Int16(n) => write!(f, "{n}"),
            SolidObject::Float64(x) => write!(f, "{x}"),
            SolidObject::Str(s) => write!(f, "'{s}'"),
        }
    }
}
