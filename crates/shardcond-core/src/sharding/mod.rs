//! Resolved routing values handed to the shard router.
//!
//! Router contract:
//! - an empty `ShardingConditions` is unconstrained (route everywhere)
//! - a `ShardingCondition::AlwaysFalse` member contributes zero shards
//! - a `ShardingValue::AlwaysFalse` never appears inside a resolved
//!   `ShardingCondition::Values`; the whole branch collapses instead

mod range;


use crate::value::Value;
use derive_more::{Deref, From, IntoIterator};
use serde::Serialize;

// re-exports
pub use range::ClosedRange;

///
/// ListShardingValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListShardingValue {
    pub table_name: String,
    pub column_name: String,
    pub values: Vec<Value>,
}

///
/// RangeShardingValue
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RangeShardingValue {
    pub table_name: String,
    pub column_name: String,
    pub range: ClosedRange,
}

///
/// ShardingValue
///
/// Resolution of every predicate on one column.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShardingValue {
    List(ListShardingValue),
    Range(RangeShardingValue),
    AlwaysFalse,
}

impl ShardingValue {
    #[must_use]
    pub const fn is_always_false(&self) -> bool {
        matches!(self, Self::AlwaysFalse)
    }

    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        match self {
            Self::List(list) => Some(&list.table_name),
            Self::Range(range) => Some(&range.table_name),
            Self::AlwaysFalse => None,
        }
    }

    #[must_use]
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Self::List(list) => Some(&list.column_name),
            Self::Range(range) => Some(&range.column_name),
            Self::AlwaysFalse => None,
        }
    }
}

///
/// ShardingCondition
///
/// One resolved conjunction: a value per constrained column in
/// first-occurrence order, or the unsatisfiable sentinel.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShardingCondition {
    Values(Vec<ShardingValue>),
    AlwaysFalse,
}

impl ShardingCondition {
    #[must_use]
    pub const fn is_always_false(&self) -> bool {
        matches!(self, Self::AlwaysFalse)
    }

    /// Resolved values; empty for the sentinel.
    #[must_use]
    pub fn sharding_values(&self) -> &[ShardingValue] {
        match self {
            Self::Values(values) => values,
            Self::AlwaysFalse => &[],
        }
    }
}

///
/// ShardingConditions
///

#[derive(Clone, Debug, Default, Deref, From, IntoIterator, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ShardingConditions {
    #[into_iterator(owned, ref)]
    conditions: Vec<ShardingCondition>,
}

impl ShardingConditions {
    /// The unconstrained result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    #[must_use]
    pub fn conditions(&self) -> &[ShardingCondition] {
        &self.conditions
    }

    /// True when there are branches and none of them can match.
    #[must_use]
    pub fn is_always_false(&self) -> bool {
        !self.conditions.is_empty()
            && self
                .conditions
                .iter()
                .all(ShardingCondition::is_always_false)
    }
}
