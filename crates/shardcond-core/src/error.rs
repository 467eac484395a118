use crate::{
    condition::{Column, ConditionError},
    value::ValueTypeMismatch,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// OptimizeError
///
/// Fatal optimizer failures. Any of these aborts the whole call; no partial
/// `ShardingConditions` is produced. Unsatisfiable branches are not errors.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum OptimizeError {
    #[error(transparent)]
    Condition(#[from] ConditionError),

    #[error("found different types for sharding value `{column}`: {source}")]
    MixedValueTypes {
        column: Column,
        #[source]
        source: ValueTypeMismatch,
    },
}

impl OptimizeError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Condition(_) => ErrorClass::InvalidStatement,
            Self::MixedValueTypes { .. } => ErrorClass::Configuration,
        }
    }

    /// Column the failure is attributed to, when known.
    #[must_use]
    pub const fn column(&self) -> Option<&Column> {
        match self {
            Self::Condition(ConditionError::Arity { column, .. })
            | Self::MixedValueTypes { column, .. } => Some(column),
            Self::Condition(ConditionError::ParameterOutOfRange { .. }) => None,
        }
    }
}

///
/// ErrorClass
///
/// Coarse classification surfaced to the statement caller.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The statement or its bound parameters are malformed.
    InvalidStatement,
    /// Sharding values of one column disagree on type.
    Configuration,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvalidStatement => "invalid_statement",
            Self::Configuration => "configuration",
        };
        f.write_str(label)
    }
}
