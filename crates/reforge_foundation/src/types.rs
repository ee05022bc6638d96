//! Type descriptors for component field schemas.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::value::Value;

/// Type descriptor for schema validation.
///
/// Used to declare replacement component fields and to check values produced
/// by migration handlers.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    /// The nil type (only value: nil).
    Nil,
    /// Boolean type.
    Bool,
    /// 64-bit signed integer.
    Int,
    /// 64-bit floating point.
    Float,
    /// String type.
    String,
    /// Symbolic enumeration literal.
    Enum,
    /// Reference to another object.
    Ref,
    /// Homogeneous vector type.
    Vec(Box<Type>),
    /// Nested record of named fields.
    Map,
    /// Optional type (value or nil).
    Option(Box<Type>),
    /// Any type (accepts any value).
    Any,
}

impl Type {
    /// Creates a vector type with the given element type.
    #[must_use]
    pub fn vec(element: Type) -> Self {
        Self::Vec(Box::new(element))
    }

    /// Creates an optional type.
    #[must_use]
    pub fn option(inner: Type) -> Self {
        Self::Option(Box::new(inner))
    }

    /// Returns true if `value` is acceptable for this type.
    ///
    /// Integers are accepted where floats are expected.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Nil, Value::Nil)
            | (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_) | Value::Int(_))
            | (Self::String, Value::String(_))
            | (Self::Enum, Value::Enum(_))
            | (Self::Ref, Value::Ref(_))
            | (Self::Map, Value::Map(_)) => true,
            (Self::Option(_), Value::Nil) => true,
            (Self::Option(inner), v) => inner.accepts(v),
            (Self::Vec(elem), Value::Vec(items)) => items.iter().all(|v| elem.accepts(v)),
            _ => false,
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool => write!(f, "bool"),
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Enum => write!(f, "enum"),
            Self::Ref => write!(f, "ref"),
            Self::Vec(elem) => write!(f, "vec<{elem}>"),
            Self::Map => write!(f, "map"),
            Self::Option(inner) => write!(f, "option<{inner}>"),
            Self::Any => write!(f, "any"),
        }
    }
}
