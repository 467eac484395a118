use crate::{
    condition::{Column, Condition, ConditionError, Parameters, ShardingOperator},
    obs::{AlwaysFalseReason, OptimizeEvent, Recorder, ValueShape},
    optimizer::algebra,
    sharding::{ClosedRange, ListShardingValue, RangeShardingValue, ShardingValue},
    value::{Value, ValueKind, ValueTypeMismatch},
};
use derive_more::From;
use std::ops::ControlFlow;

///
/// ColumnError
///
/// Failure while resolving one column. The engine attaches the column.
///

#[derive(Debug, From)]
pub(crate) enum ColumnError {
    Condition(ConditionError),
    Mismatch(ValueTypeMismatch),
}

///
/// ColumnFold
///
/// Accumulator for one column's conditions: at most one value set and at
/// most one range, plus the value kind every admitted value must share.
///

#[derive(Debug, Default)]
struct ColumnFold {
    kind: Option<ValueKind>,
    values: Option<Vec<Value>>,
    range: Option<ClosedRange>,
}

impl ColumnFold {
    // Every resolved value passes through here before any algebra runs, so a
    // mismatch is reported even when an intersection would come out empty.
    fn admit(&mut self, values: &[Value]) -> Result<(), ValueTypeMismatch> {
        for value in values {
            let found = value.kind();
            match self.kind {
                None => self.kind = Some(found),
                Some(expected) if expected != found => {
                    return Err(ValueTypeMismatch { expected, found });
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    fn fold(
        mut self,
        condition: &Condition,
        parameters: &Parameters<'_>,
    ) -> Result<ControlFlow<AlwaysFalseReason, Self>, ColumnError> {
        match condition.operator() {
            ShardingOperator::Equal | ShardingOperator::In => {
                let values = condition.condition_values(parameters)?;
                self.admit(&values)?;

                let values = algebra::intersect_values(values, self.values.as_deref())?;
                if values.is_empty() {
                    return Ok(ControlFlow::Break(AlwaysFalseReason::DisjointValues));
                }
                self.values = Some(values);
            }
            ShardingOperator::Between => {
                let bounds = condition.condition_values(parameters)?;
                self.admit(&bounds)?;

                let [lower, upper] = between_bounds(condition, bounds)?;
                let Some(range) = ClosedRange::new(lower, upper)? else {
                    return Ok(ControlFlow::Break(AlwaysFalseReason::InvertedRange));
                };
                let Some(range) = algebra::intersect_ranges(range, self.range.as_ref())? else {
                    return Ok(ControlFlow::Break(AlwaysFalseReason::DisjointRanges));
                };
                self.range = Some(range);
            }
            ShardingOperator::NotEqual
            | ShardingOperator::LessThan
            | ShardingOperator::LessThanOrEqual
            | ShardingOperator::GreaterThan
            | ShardingOperator::GreaterThanOrEqual
            | ShardingOperator::NotIn => {}
        }

        Ok(ControlFlow::Continue(self))
    }

    fn finish(
        self,
        column: &Column,
    ) -> Result<ControlFlow<AlwaysFalseReason, Option<ShardingValue>>, ValueTypeMismatch> {
        let value = match (self.values, self.range) {
            (None, None) => None,
            (None, Some(range)) => Some(range_value(column, range)),
            (Some(values), None) => Some(list_value(column, values)),
            (Some(values), Some(range)) => {
                let values = algebra::clip_values(values, &range)?;
                if values.is_empty() {
                    return Ok(ControlFlow::Break(AlwaysFalseReason::ValuesOutsideRange));
                }
                Some(list_value(column, values))
            }
        };

        Ok(ControlFlow::Continue(value))
    }
}

/// Resolve every condition on one column into a single sharding value.
///
/// Returns `None` when the column only carries operators that do not
/// narrow routing.
pub(crate) fn resolve_column(
    column: &Column,
    conditions: &[&Condition],
    parameters: &Parameters<'_>,
    recorder: Recorder,
) -> Result<Option<ShardingValue>, ColumnError> {
    let mut fold = ColumnFold::default();
    for condition in conditions {
        match fold.fold(condition, parameters)? {
            ControlFlow::Continue(next) => fold = next,
            ControlFlow::Break(reason) => return Ok(Some(always_false(reason, recorder))),
        }
    }

    match fold.finish(column)? {
        ControlFlow::Continue(value) => {
            if let Some(value) = &value {
                let shape = if matches!(value, ShardingValue::Range(_)) {
                    ValueShape::Range
                } else {
                    ValueShape::List
                };
                recorder.record(OptimizeEvent::ColumnResolved { shape });
            }

            Ok(value)
        }
        ControlFlow::Break(reason) => Ok(Some(always_false(reason, recorder))),
    }
}

fn always_false(reason: AlwaysFalseReason, recorder: Recorder) -> ShardingValue {
    recorder.record(OptimizeEvent::ColumnAlwaysFalse { reason });

    ShardingValue::AlwaysFalse
}

// Arity is enforced when the condition is built; a short vector still maps
// to a typed error rather than a panic.
fn between_bounds(condition: &Condition, bounds: Vec<Value>) -> Result<[Value; 2], ColumnError> {
    bounds.try_into().map_err(|bounds: Vec<Value>| {
        ColumnError::Condition(ConditionError::Arity {
            column: condition.column().clone(),
            operator: condition.operator(),
            expected: ShardingOperator::Between.arity(),
            found: bounds.len(),
        })
    })
}

fn list_value(column: &Column, values: Vec<Value>) -> ShardingValue {
    ShardingValue::List(ListShardingValue {
        table_name: column.table_name.clone(),
        column_name: column.name.clone(),
        values,
    })
}

fn range_value(column: &Column, range: ClosedRange) -> ShardingValue {
    ShardingValue::Range(RangeShardingValue {
        table_name: column.table_name.clone(),
        column_name: column.name.clone(),
        range,
    })
}
