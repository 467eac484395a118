use crate::value::{Value, ValueTypeMismatch};
use serde::Serialize;
use std::cmp::Ordering;

///
/// ClosedRange
///
/// Non-empty closed interval `[lower, upper]` over one value kind.
/// Construction and intersection return `None` instead of an empty range.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClosedRange {
    lower: Value,
    upper: Value,
}

impl ClosedRange {
    /// Build `[lower, upper]`; `None` when `lower > upper`.
    pub fn new(lower: Value, upper: Value) -> Result<Option<Self>, ValueTypeMismatch> {
        if lower.try_cmp(&upper)? == Ordering::Greater {
            return Ok(None);
        }

        Ok(Some(Self { lower, upper }))
    }

    #[must_use]
    pub const fn lower(&self) -> &Value {
        &self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> &Value {
        &self.upper
    }

    pub fn contains(&self, value: &Value) -> Result<bool, ValueTypeMismatch> {
        Ok(self.lower.try_cmp(value)? != Ordering::Greater
            && value.try_cmp(&self.upper)? != Ordering::Greater)
    }

    /// Overlap of two ranges; `None` when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Result<Option<Self>, ValueTypeMismatch> {
        let lower = match self.lower.try_cmp(&other.lower)? {
            Ordering::Less => &other.lower,
            Ordering::Equal | Ordering::Greater => &self.lower,
        };
        let upper = match self.upper.try_cmp(&other.upper)? {
            Ordering::Greater => &other.upper,
            Ordering::Equal | Ordering::Less => &self.upper,
        };

        Self::new(lower.clone(), upper.clone())
    }
}
