//! Value algebra over resolved condition values.
//!
//! All operators are pure. An empty result (or `None` range) means the
//! operands cannot hold together; callers turn that into `AlwaysFalse`.

use crate::{
    sharding::ClosedRange,
    value::{Value, ValueTypeMismatch},
};

/// Intersect freshly resolved values with the accumulated set.
///
/// Absent `accumulated` is the identity. Membership uses strict equality and
/// the result keeps the order (and duplicates) of `values`.
pub(crate) fn intersect_values(
    values: Vec<Value>,
    accumulated: Option<&[Value]>,
) -> Result<Vec<Value>, ValueTypeMismatch> {
    let Some(accumulated) = accumulated else {
        return Ok(values);
    };

    let mut retained = Vec::with_capacity(values.len().min(accumulated.len()));
    for value in values {
        if contains_value(accumulated, &value)? {
            retained.push(value);
        }
    }

    Ok(retained)
}

/// Intersect a freshly built range with the accumulated range.
///
/// Absent `accumulated` is the identity; `None` means the ranges are disjoint.
pub(crate) fn intersect_ranges(
    range: ClosedRange,
    accumulated: Option<&ClosedRange>,
) -> Result<Option<ClosedRange>, ValueTypeMismatch> {
    match accumulated {
        None => Ok(Some(range)),
        Some(accumulated) => range.intersection(accumulated),
    }
}

/// Keep the values that fall inside `range`, in their original order.
pub(crate) fn clip_values(
    values: Vec<Value>,
    range: &ClosedRange,
) -> Result<Vec<Value>, ValueTypeMismatch> {
    let mut clipped = Vec::with_capacity(values.len());
    for value in values {
        if range.contains(&value)? {
            clipped.push(value);
        }
    }

    Ok(clipped)
}

fn contains_value(haystack: &[Value], needle: &Value) -> Result<bool, ValueTypeMismatch> {
    for candidate in haystack {
        if candidate.try_eq(needle)? {
            return Ok(true);
        }
    }

    Ok(false)
}

///
/// TESTS
///
