//! Core of shardcond: the condition model, the value algebra, and the
//! optimizer that turns a statement's sharding predicates into
//! per-branch routing values.
#![warn(unreachable_pub)]

pub(crate) mod logging;

// public exports are one module level down
pub mod condition;
pub mod error;
pub mod obs;
pub mod optimizer;
pub mod sharding;
pub mod value;

pub use error::{ErrorClass, OptimizeError};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        condition::{
            AndCondition, Column, Condition, ConditionValue, GeneratedKey, OrCondition,
            ShardingOperator,
        },
        optimizer::OptimizeEngine,
        sharding::{
            ClosedRange, ListShardingValue, RangeShardingValue, ShardingCondition,
            ShardingConditions, ShardingValue,
        },
        value::Value,
    };
}
