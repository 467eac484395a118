//! Condition model: columns, comparisons, conjunctions and disjunctions as
//! produced by the statement parser.
//!
//! This layer is a read-only snapshot of sharding-relevant predicates.
//! It performs no algebra; all interpretation happens in `optimizer`.

mod generated_key;
mod map;
mod parameters;


use crate::value::Value;
use derive_more::{Deref, From, IntoIterator};
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

// re-exports
pub use generated_key::GeneratedKey;
pub use map::{ColumnConditions, ConditionsMap};
pub use parameters::Parameters;

///
/// ConditionError
///
/// Malformed conditions and unresolved placeholders.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ConditionError {
    #[error("operator {operator} on `{column}` expects {expected} value(s), found {found}")]
    Arity {
        column: Column,
        operator: ShardingOperator,
        expected: Arity,
        found: usize,
    },

    #[error("placeholder {index} is out of range for {available} bound parameter(s)")]
    ParameterOutOfRange { index: usize, available: usize },
}

///
/// Column
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Column {
    pub table_name: String,
    pub name: String,
}

impl Column {
    #[must_use]
    pub fn new(table_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_name, self.name)
    }
}

///
/// ShardingOperator
///
/// Only `Equal`, `In` and `Between` narrow routing. The remaining operators
/// are carried so the model mirrors the parsed statement, and are skipped
/// during optimization.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ShardingOperator {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
    In,
    NotIn,
    Between,
}

impl ShardingOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "<>",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::In => "IN",
            Self::NotIn => "NOT IN",
            Self::Between => "BETWEEN",
        }
    }

    /// True when the operator contributes to routing.
    #[must_use]
    pub const fn is_sharding(self) -> bool {
        matches!(self, Self::Equal | Self::In | Self::Between)
    }

    #[must_use]
    pub const fn arity(self) -> Arity {
        match self {
            Self::In | Self::NotIn => Arity::AtLeast(1),
            Self::Between => Arity::Exactly(2),
            Self::Equal
            | Self::NotEqual
            | Self::LessThan
            | Self::LessThanOrEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual => Arity::Exactly(1),
        }
    }
}

impl fmt::Display for ShardingOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// Arity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {n}"),
            Self::AtLeast(n) => write!(f, "at least {n}"),
        }
    }
}

///
/// ConditionValue
///
/// One value expression: a literal, or a placeholder index into the
/// bound parameter sequence.
///

#[derive(Clone, Debug, From, PartialEq)]
pub enum ConditionValue {
    Literal(Value),
    #[from(skip)]
    Parameter(usize),
}

impl ConditionValue {
    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub const fn parameter(index: usize) -> Self {
        Self::Parameter(index)
    }

    /// Resolve to a concrete value.
    pub fn resolve(&self, parameters: &Parameters<'_>) -> Result<Value, ConditionError> {
        match self {
            Self::Literal(value) => Ok(value.clone()),
            Self::Parameter(index) => parameters.get(*index).cloned(),
        }
    }
}

///
/// Condition
///
/// One comparison of a column against one or more value expressions.
/// Arity is checked at construction: `Between` holds lower then upper.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Condition {
    column: Column,
    operator: ShardingOperator,
    values: Vec<ConditionValue>,
}

impl Condition {
    pub fn new(
        column: Column,
        operator: ShardingOperator,
        values: Vec<ConditionValue>,
    ) -> Result<Self, ConditionError> {
        let expected = operator.arity();
        if !expected.accepts(values.len()) {
            return Err(ConditionError::Arity {
                column,
                operator,
                expected,
                found: values.len(),
            });
        }

        Ok(Self {
            column,
            operator,
            values,
        })
    }

    #[must_use]
    pub fn equal(column: Column, value: impl Into<ConditionValue>) -> Self {
        Self {
            column,
            operator: ShardingOperator::Equal,
            values: vec![value.into()],
        }
    }

    #[must_use]
    pub fn between(
        column: Column,
        lower: impl Into<ConditionValue>,
        upper: impl Into<ConditionValue>,
    ) -> Self {
        Self {
            column,
            operator: ShardingOperator::Between,
            values: vec![lower.into(), upper.into()],
        }
    }

    pub fn in_list<I, V>(column: Column, values: I) -> Result<Self, ConditionError>
    where
        I: IntoIterator<Item = V>,
        V: Into<ConditionValue>,
    {
        Self::new(
            column,
            ShardingOperator::In,
            values.into_iter().map(Into::into).collect(),
        )
    }

    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    #[must_use]
    pub const fn operator(&self) -> ShardingOperator {
        self.operator
    }

    #[must_use]
    pub fn values(&self) -> &[ConditionValue] {
        &self.values
    }

    /// Resolve every value expression, in declaration order.
    pub fn condition_values(
        &self,
        parameters: &Parameters<'_>,
    ) -> Result<Vec<Value>, ConditionError> {
        self.values
            .iter()
            .map(|value| value.resolve(parameters))
            .collect()
    }
}

///
/// AndCondition
///
/// Conjunction of conditions, in statement order.
///

#[derive(Clone, Debug, Default, Deref, From, IntoIterator, PartialEq)]
pub struct AndCondition {
    #[into_iterator(owned, ref)]
    conditions: Vec<Condition>,
}

impl AndCondition {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            conditions: Vec::new(),
        }
    }

    pub fn push(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    #[must_use]
    pub fn with(mut self, condition: Condition) -> Self {
        self.push(condition);
        self
    }

    #[must_use]
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Group conditions by column, in first-occurrence column order.
    #[must_use]
    pub fn conditions_map(&self) -> ConditionsMap<'_> {
        self.conditions.iter().collect()
    }
}

impl FromIterator<Condition> for AndCondition {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        Self {
            conditions: iter.into_iter().collect(),
        }
    }
}

///
/// OrCondition
///
/// Disjunction of conjunctions. Empty means no sharding-relevant
/// predicate was found, not "always false".
///

#[derive(Clone, Debug, Default, Deref, From, IntoIterator, PartialEq)]
pub struct OrCondition {
    #[into_iterator(owned, ref)]
    and_conditions: Vec<AndCondition>,
}

impl OrCondition {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            and_conditions: Vec::new(),
        }
    }

    pub fn push(&mut self, and_condition: AndCondition) {
        self.and_conditions.push(and_condition);
    }

    #[must_use]
    pub fn with(mut self, and_condition: AndCondition) -> Self {
        self.push(and_condition);
        self
    }

    #[must_use]
    pub fn and_conditions(&self) -> &[AndCondition] {
        &self.and_conditions
    }
}

impl FromIterator<AndCondition> for OrCondition {
    fn from_iter<I: IntoIterator<Item = AndCondition>>(iter: I) -> Self {
        Self {
            and_conditions: iter.into_iter().collect(),
        }
    }
}
