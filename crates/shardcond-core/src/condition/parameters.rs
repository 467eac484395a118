use crate::{condition::ConditionError, value::Value};
use shardcond_config::ParameterBase;

///
/// Parameters
///
/// Bound parameter sequence addressed by placeholder index.
/// The base decides whether placeholder `1` names the first or the second slot.
///

#[derive(Clone, Copy, Debug)]
pub struct Parameters<'a> {
    values: &'a [Value],
    base: ParameterBase,
}

impl<'a> Parameters<'a> {
    #[must_use]
    pub const fn new(values: &'a [Value], base: ParameterBase) -> Self {
        Self { values, base }
    }

    #[must_use]
    pub const fn zero_based(values: &'a [Value]) -> Self {
        Self::new(values, ParameterBase::Zero)
    }

    #[must_use]
    pub const fn base(&self) -> ParameterBase {
        self.base
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&'a Value, ConditionError> {
        index
            .checked_sub(self.base.offset())
            .and_then(|slot| self.values.get(slot))
            .ok_or(ConditionError::ParameterOutOfRange {
                index,
                available: self.values.len(),
            })
    }
}
