//! Sharding-condition optimizer.
//!
//! Reduces a disjunction of conjunctions to one `ShardingCondition` per
//! branch. Each branch is resolved column by column:
//!
//! - `=` / `IN` values are intersected into one value set
//! - `BETWEEN` bounds are intersected into one closed range
//! - a column holding both is answered by the set members inside the range
//! - any empty intersection collapses the branch to `AlwaysFalse`
//!
//! Type mismatches abort the whole call; unsatisfiable branches do not.

mod algebra;
mod resolve;

#[cfg(test)]
mod tests;

use crate::{
    condition::{Column, ConditionsMap, GeneratedKey, OrCondition, Parameters},
    error::OptimizeError,
    logging::shard_log,
    obs::{OptimizeEvent, Recorder},
    sharding::{ShardingCondition, ShardingConditions, ShardingValue},
    value::Value,
};
use resolve::{ColumnError, resolve_column};
use shardcond_config::OptimizerConfig;

///
/// OptimizeEngine
///
/// Stateless apart from its configuration; one engine may serve any number
/// of concurrent calls.
///

#[derive(Clone, Debug, Default)]
pub struct OptimizeEngine {
    config: OptimizerConfig,
}

impl OptimizeEngine {
    #[must_use]
    pub const fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Optimize the statement's sharding predicates.
    ///
    /// - no generated key and no branches: empty (unconstrained) result
    /// - generated key and no branches: one condition from the key alone
    /// - otherwise: one condition per branch, with the generated key ANDed in
    ///   on columns the branch does not already constrain
    pub fn optimize(
        &self,
        or_condition: &OrCondition,
        parameters: &[Value],
        generated_key: Option<&GeneratedKey>,
    ) -> Result<ShardingConditions, OptimizeError> {
        let recorder = Recorder::new(self.config.metrics);
        recorder.record(OptimizeEvent::OptimizeStart {
            branches: or_condition.len() as u64,
            generated_key: generated_key.is_some(),
        });

        let parameters = Parameters::new(parameters, self.config.parameter_base);

        match (generated_key, or_condition.is_empty()) {
            (None, true) => {
                recorder.record(OptimizeEvent::Unconstrained);

                Ok(ShardingConditions::new())
            }
            (Some(generated_key), true) => {
                let condition =
                    resolve_branch(0, &generated_key.conditions_map(), &parameters, recorder)?;

                Ok(ShardingConditions::from(vec![condition]))
            }
            (generated_key, false) => {
                let key_map = generated_key.map(GeneratedKey::conditions_map);
                let mut conditions = Vec::with_capacity(or_condition.len());
                for (branch, and_condition) in or_condition.iter().enumerate() {
                    let own = and_condition.conditions_map();
                    let merged = match &key_map {
                        Some(key_map) => own.merged_with(key_map),
                        None => own,
                    };
                    conditions.push(resolve_branch(branch, &merged, &parameters, recorder)?);
                }

                Ok(ShardingConditions::from(conditions))
            }
        }
    }
}

/// Optimize with the default configuration.
pub fn optimize(
    or_condition: &OrCondition,
    parameters: &[Value],
    generated_key: Option<&GeneratedKey>,
) -> Result<ShardingConditions, OptimizeError> {
    OptimizeEngine::default().optimize(or_condition, parameters, generated_key)
}

// Resolve one conjunction. The first unsatisfiable column ends the branch;
// columns after it are not examined.
fn resolve_branch(
    branch: usize,
    conditions_map: &ConditionsMap<'_>,
    parameters: &Parameters<'_>,
    recorder: Recorder,
) -> Result<ShardingCondition, OptimizeError> {
    let mut values = Vec::with_capacity(conditions_map.len());
    for entry in conditions_map {
        let resolved = resolve_column(entry.column, &entry.conditions, parameters, recorder)
            .map_err(|err| column_error(entry.column, err, recorder))?;

        match resolved {
            Some(ShardingValue::AlwaysFalse) => {
                shard_log!(
                    log::Level::Debug,
                    "branch_always_false",
                    "branch={} column={}",
                    branch,
                    entry.column,
                );
                recorder.record(OptimizeEvent::BranchAlwaysFalse);

                return Ok(ShardingCondition::AlwaysFalse);
            }
            Some(value) => values.push(value),
            None => {}
        }
    }

    recorder.record(OptimizeEvent::BranchResolved {
        values: values.len() as u64,
    });

    Ok(ShardingCondition::Values(values))
}

fn column_error(column: &Column, err: ColumnError, recorder: Recorder) -> OptimizeError {
    match err {
        ColumnError::Condition(err) => OptimizeError::Condition(err),
        ColumnError::Mismatch(source) => {
            shard_log!(
                log::Level::Warn,
                "sharding_value_type_mismatch",
                "column={} expected={} found={}",
                column,
                source.expected,
                source.found,
            );
            recorder.record(OptimizeEvent::TypeMismatch);

            OptimizeError::MixedValueTypes {
                column: column.clone(),
                source,
            }
        }
    }
}
