//! Comparable scalar values carried by sharding conditions.

mod compare;


use derive_more::From;
use serde::Serialize;
use std::{cmp::Ordering, fmt};

// re-exports
pub use compare::{ValueTypeMismatch, strict_cmp};

///
/// Value
///
/// Literal or bound-parameter value a condition compares a column against.
/// Values of different kinds never compare; there is no implicit widening.
///

#[derive(Clone, Debug, From, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float(f64),
    Int(i64),
    Text(String),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Blob(_) => ValueKind::Blob,
            Self::Bool(_) => ValueKind::Bool,
            Self::Float(_) => ValueKind::Float,
            Self::Int(_) => ValueKind::Int,
            Self::Text(_) => ValueKind::Text,
            Self::Uint(_) => ValueKind::Uint,
        }
    }

    /// Compare two values of the same kind.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, ValueTypeMismatch> {
        strict_cmp(self, other)
    }

    /// Equality under the strict comparator.
    pub fn try_eq(&self, other: &Self) -> Result<bool, ValueTypeMismatch> {
        Ok(self.try_cmp(other)? == Ordering::Equal)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Uint(u64::from(value))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blob(bytes) => write!(f, "blob[{}]", bytes.len()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Uint(v) => write!(f, "{v}"),
        }
    }
}

///
/// ValueKind
///
/// Comparability class of a value. Two values compare only when their
/// kinds are equal.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ValueKind {
    Blob,
    Bool,
    Float,
    Int,
    Text,
    Uint,
}

impl ValueKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Uint => "uint",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
