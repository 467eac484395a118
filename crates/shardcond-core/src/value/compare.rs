use crate::value::{Value, ValueKind};
use std::cmp::Ordering;
use thiserror::Error as ThisError;

///
/// ValueTypeMismatch
///
/// Two values of different kinds were compared.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
#[error("cannot compare {found} value against {expected} value")]
pub struct ValueTypeMismatch {
    pub expected: ValueKind,
    pub found: ValueKind,
}

/// Strict comparator for identical variants.
///
/// Floats use total ordering so NaN compares deterministically.
/// Mixed variants return `ValueTypeMismatch` with `left` as the expected kind.
pub fn strict_cmp(left: &Value, right: &Value) -> Result<Ordering, ValueTypeMismatch> {
    match (left, right) {
        (Value::Blob(a), Value::Blob(b)) => Ok(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => Ok(a.total_cmp(b)),
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
        (Value::Uint(a), Value::Uint(b)) => Ok(a.cmp(b)),
        _ => Err(ValueTypeMismatch {
            expected: left.kind(),
            found: right.kind(),
        }),
    }
}
