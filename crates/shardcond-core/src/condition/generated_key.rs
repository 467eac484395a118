use crate::condition::{Column, Condition, ConditionError, ConditionValue, ConditionsMap};

///
/// GeneratedKey
///
/// Primary-key values synthesized for an INSERT. Routing treats them as an
/// implicit `column IN (keys...)` ANDed into every branch.
///

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedKey {
    condition: Condition,
}

impl GeneratedKey {
    /// Build from the key column and at least one generated key expression.
    pub fn new<I, V>(column: Column, keys: I) -> Result<Self, ConditionError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        Ok(Self {
            condition: Condition::in_list(column, keys)?,
        })
    }

    #[must_use]
    pub const fn column(&self) -> &Column {
        self.condition.column()
    }

    #[must_use]
    pub fn keys(&self) -> &[ConditionValue] {
        self.condition.values()
    }

    #[must_use]
    pub fn conditions_map(&self) -> ConditionsMap<'_> {
        std::iter::once(&self.condition).collect()
    }
}
