//! Generated argument values.
//!
//! Values mirror [`ConcreteType`]: a bits leaf carries its payload and
//! signedness, arrays and tuples carry their elements. Values are never
//! modified after construction; generators always build new ones.

mod bits;

use std::fmt;

pub use bits::Bits;

use crate::types::ConcreteType;

/// A generated datum conforming to a [`ConcreteType`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A bit vector. The width is `bits.width()`; signedness only affects how
    /// consumers interpret the payload.
    Bits { signed: bool, bits: Bits },
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn make_ubits(bits: Bits) -> Self {
        Value::Bits {
            signed: false,
            bits,
        }
    }

    pub fn make_sbits(bits: Bits) -> Self {
        Value::Bits { signed: true, bits }
    }

    /// Returns the payload of a bits value.
    pub fn as_bits(&self) -> Option<&Bits> {
        match self {
            Value::Bits { bits, .. } => Some(bits),
            Value::Array(_) | Value::Tuple(_) => None,
        }
    }

    /// The value's raw bit pattern. Aggregates concatenate their flattened
    /// elements with element 0 in the most significant position.
    pub fn flatten(&self) -> Bits {
        match self {
            Value::Bits { bits, .. } => bits.clone(),
            Value::Array(elements) | Value::Tuple(elements) => {
                let parts: Vec<Bits> = elements.iter().map(Value::flatten).collect();
                Bits::concat(&parts)
            }
        }
    }

    /// Checks that this value's shape and every leaf's width and signedness
    /// match `ty` exactly.
    pub fn conforms_to(&self, ty: &ConcreteType) -> bool {
        match (self, ty) {
            (Value::Bits { signed, bits }, ConcreteType::Bits { width, signed: expected }) => {
                bits.width() == *width && signed == expected
            }
            (Value::Array(elements), ConcreteType::Array { element, length }) => {
                elements.len() == *length && elements.iter().all(|e| e.conforms_to(element))
            }
            (Value::Tuple(elements), ConcreteType::Tuple { members }) => {
                elements.len() == members.len()
                    && elements.iter().zip(members).all(|(e, m)| e.conforms_to(m))
            }
            _ => false,
        }
    }
}

/// IR text form, e.g. `(bits[4]:0x1, [bits[2]:0x3, bits[2]:0x0])`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bits { bits, .. } => write!(f, "bits[{}]:{}", bits.width(), bits),
            Value::Array(elements) => {
                f.write_str("[")?;
                write_joined(f, elements)?;
                f.write_str("]")
            }
            Value::Tuple(elements) => {
                f.write_str("(")?;
                write_joined(f, elements)?;
                f.write_str(")")
            }
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, values: &[Value]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}
