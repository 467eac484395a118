
use crate::{
    condition::{
        AndCondition, Column, Condition, ConditionError, ConditionValue, GeneratedKey, OrCondition,
        ShardingOperator,
    },
    error::{ErrorClass, OptimizeError},
    optimizer::{OptimizeEngine, optimize},
    sharding::{
        ClosedRange, ListShardingValue, RangeShardingValue, ShardingCondition, ShardingValue,
    },
    value::{Value, ValueKind},
};
use shardcond_config::{OptimizerConfig, ParameterBase};

const TABLE: &str = "t_order";

fn col(name: &str) -> Column {
    Column::new(TABLE, name)
}

fn lit(value: impl Into<Value>) -> ConditionValue {
    ConditionValue::literal(value)
}

fn eq(name: &str, value: impl Into<Value>) -> Condition {
    Condition::equal(col(name), lit(value))
}

fn in_ints(name: &str, values: &[i64]) -> Condition {
    Condition::in_list(col(name), values.iter().copied().map(lit)).expect("non-empty IN")
}

fn between(name: &str, lower: i64, upper: i64) -> Condition {
    Condition::between(col(name), lit(lower), lit(upper))
}

fn and(conditions: Vec<Condition>) -> AndCondition {
    AndCondition::from(conditions)
}

fn list(name: &str, values: &[i64]) -> ShardingValue {
    ShardingValue::List(ListShardingValue {
        table_name: TABLE.to_string(),
        column_name: name.to_string(),
        values: values.iter().copied().map(Value::Int).collect(),
    })
}

fn range(name: &str, lower: i64, upper: i64) -> ShardingValue {
    ShardingValue::Range(RangeShardingValue {
        table_name: TABLE.to_string(),
        column_name: name.to_string(),
        range: ClosedRange::new(Value::Int(lower), Value::Int(upper))
            .expect("same kind")
            .expect("non-empty"),
    })
}

fn optimize_one(conditions: Vec<Condition>) -> ShardingCondition {
    let or = OrCondition::from(vec![and(conditions)]);
    let result = optimize(&or, &[], None).expect("optimize should succeed");
    assert_eq!(result.len(), 1);

    result.conditions()[0].clone()
}

#[test]
fn empty_disjunction_without_generated_key_is_unconstrained() {
    let result = optimize(&OrCondition::new(), &[], None).expect("optimize");

    assert!(result.is_empty());
    assert!(!result.is_always_false());
}

#[test]
fn empty_disjunction_with_generated_key_routes_by_key_only() {
    let key = GeneratedKey::new(col("id"), [lit(10), lit(11), lit(12)]).expect("valid key");

    let result = optimize(&OrCondition::new(), &[], Some(&key)).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[ShardingCondition::Values(vec![list("id", &[10, 11, 12])])]
    );
}

#[test]
fn each_branch_resolves_in_first_occurrence_column_order() {
    let or = OrCondition::from(vec![
        and(vec![eq("a", 1), in_ints("b", &[1, 2])]),
        and(vec![eq("a", 2), eq("b", 5)]),
    ]);

    let result = optimize(&or, &[], None).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[
            ShardingCondition::Values(vec![list("a", &[1]), list("b", &[1, 2])]),
            ShardingCondition::Values(vec![list("a", &[2]), list("b", &[5])]),
        ]
    );
}

#[test]
fn grouped_columns_follow_first_occurrence_even_when_interleaved() {
    let condition = optimize_one(vec![
        eq("b", 1),
        eq("a", 7),
        in_ints("b", &[3, 1]),
    ]);

    assert_eq!(
        condition,
        ShardingCondition::Values(vec![list("b", &[1]), list("a", &[7])])
    );
}

#[test]
fn inverted_between_collapses_only_its_branch() {
    let or = OrCondition::from(vec![
        and(vec![between("age", 30, 20)]),
        and(vec![eq("age", 25)]),
    ]);

    let result = optimize(&or, &[], None).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[
            ShardingCondition::AlwaysFalse,
            ShardingCondition::Values(vec![list("age", &[25])]),
        ]
    );
    assert!(!result.is_always_false());
}

#[test]
fn mixed_value_types_abort_the_whole_call() {
    let or = OrCondition::from(vec![
        and(vec![eq("user_id", 1)]),
        and(vec![eq("status", "active"), eq("status", 5)]),
        and(vec![eq("user_id", 2)]),
    ]);

    let err = optimize(&or, &[], None).expect_err("text and int on one column");

    assert_eq!(err.column(), Some(&col("status")));
    assert_eq!(err.class(), ErrorClass::Configuration);
    match err {
        OptimizeError::MixedValueTypes { column, source } => {
            assert_eq!(column, col("status"));
            assert_eq!(source.expected, ValueKind::Text);
            assert_eq!(source.found, ValueKind::Int);
        }
        OptimizeError::Condition(_) => panic!("expected a type mismatch"),
    }
}

#[test]
fn type_mismatch_message_names_the_column() {
    let or = OrCondition::from(vec![and(vec![eq("status", "active"), eq("status", 5)])]);

    let err = optimize(&or, &[], None).expect_err("mismatch");

    assert!(
        err.to_string()
            .starts_with("found different types for sharding value `t_order.status`")
    );
}

#[test]
fn type_mismatch_is_reported_even_when_sets_are_disjoint() {
    let or = OrCondition::from(vec![and(vec![
        Condition::in_list(col("status"), [lit("a"), lit("b")]).expect("valid IN"),
        in_ints("status", &[5]),
    ])]);

    assert!(matches!(
        optimize(&or, &[], None),
        Err(OptimizeError::MixedValueTypes { .. })
    ));
}

#[test]
fn type_mismatch_between_set_and_range() {
    let or = OrCondition::from(vec![and(vec![
        eq("price", 5),
        Condition::between(col("price"), lit(1_u64), lit(9_u64)),
    ])]);

    let err = optimize(&or, &[], None).expect_err("int vs uint");

    assert_eq!(err.column(), Some(&col("price")));
}

#[test]
fn in_lists_intersect() {
    assert_eq!(
        optimize_one(vec![in_ints("id", &[1, 2, 3, 4]), in_ints("id", &[4, 2, 9])]),
        ShardingCondition::Values(vec![list("id", &[4, 2])])
    );
}

#[test]
fn disjoint_in_lists_collapse_branch() {
    assert_eq!(
        optimize_one(vec![in_ints("id", &[1, 2]), eq("id", 3)]),
        ShardingCondition::AlwaysFalse
    );
}

#[test]
fn between_ranges_intersect() {
    assert_eq!(
        optimize_one(vec![between("age", 10, 40), between("age", 20, 60)]),
        ShardingCondition::Values(vec![range("age", 20, 40)])
    );
}

#[test]
fn disjoint_between_ranges_collapse_branch() {
    assert_eq!(
        optimize_one(vec![between("age", 10, 20), between("age", 21, 60)]),
        ShardingCondition::AlwaysFalse
    );
}

#[test]
fn set_and_range_on_one_column_keep_members_inside_range() {
    assert_eq!(
        optimize_one(vec![
            in_ints("age", &[35, 5, 20, 30, 99]),
            between("age", 20, 40),
        ]),
        ShardingCondition::Values(vec![list("age", &[35, 20, 30])])
    );
}

#[test]
fn range_before_set_still_clips() {
    assert_eq!(
        optimize_one(vec![between("age", 20, 40), eq("age", 30)]),
        ShardingCondition::Values(vec![list("age", &[30])])
    );
}

#[test]
fn set_entirely_outside_range_collapses_branch() {
    assert_eq!(
        optimize_one(vec![in_ints("age", &[1, 2]), between("age", 20, 40)]),
        ShardingCondition::AlwaysFalse
    );
}

#[test]
fn always_false_column_stops_branch_before_later_columns() {
    // `b` mixes kinds, but the branch is already unsatisfiable at `a`.
    let condition = optimize_one(vec![
        eq("a", 1),
        eq("a", 2),
        eq("b", "x"),
        eq("b", 5),
    ]);

    assert_eq!(condition, ShardingCondition::AlwaysFalse);
}

#[test]
fn ignored_operators_do_not_constrain() {
    let not_equal = Condition::new(col("a"), ShardingOperator::NotEqual, vec![lit(3)])
        .expect("valid <>");
    let greater = Condition::new(col("b"), ShardingOperator::GreaterThan, vec![lit(3)])
        .expect("valid >");

    assert_eq!(
        optimize_one(vec![not_equal, eq("c", 1), greater, eq("a", 3)]),
        ShardingCondition::Values(vec![list("a", &[3]), list("c", &[1])])
    );
}

#[test]
fn ignored_operators_skip_placeholder_resolution() {
    let not_in = Condition::new(
        col("a"),
        ShardingOperator::NotIn,
        vec![ConditionValue::parameter(42)],
    )
    .expect("valid NOT IN");

    assert_eq!(optimize_one(vec![not_in]), ShardingCondition::Values(vec![]));
}

#[test]
fn generated_key_is_appended_to_every_branch() {
    let key = GeneratedKey::new(col("order_id"), [lit(100), lit(101)]).expect("valid key");
    let or = OrCondition::from(vec![
        and(vec![eq("user_id", 1)]),
        and(vec![eq("user_id", 2)]),
    ]);

    let result = optimize(&or, &[], Some(&key)).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[
            ShardingCondition::Values(vec![list("user_id", &[1]), list("order_id", &[100, 101])]),
            ShardingCondition::Values(vec![list("user_id", &[2]), list("order_id", &[100, 101])]),
        ]
    );
}

#[test]
fn branch_predicate_wins_over_generated_key_on_same_column() {
    let key = GeneratedKey::new(col("id"), [lit(10)]).expect("valid key");
    let or = OrCondition::from(vec![and(vec![eq("id", 1)])]);

    let result = optimize(&or, &[], Some(&key)).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[ShardingCondition::Values(vec![list("id", &[1])])]
    );
}

#[test]
fn generated_key_placeholders_resolve_against_parameters() {
    let key = GeneratedKey::new(col("id"), [ConditionValue::parameter(0)]).expect("valid key");
    let parameters = [Value::Int(77)];

    let result = optimize(&OrCondition::new(), &parameters, Some(&key)).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[ShardingCondition::Values(vec![list("id", &[77])])]
    );
}

#[test]
fn one_based_placeholders_follow_config() {
    let engine = OptimizeEngine::new(
        OptimizerConfig::default().with_parameter_base(ParameterBase::One),
    );
    let or = OrCondition::from(vec![and(vec![
        Condition::equal(col("user_id"), ConditionValue::parameter(1)),
        Condition::between(
            col("age"),
            ConditionValue::parameter(2),
            ConditionValue::parameter(3),
        ),
    ])]);
    let parameters = [Value::Int(9), Value::Int(18), Value::Int(65)];

    let result = engine.optimize(&or, &parameters, None).expect("optimize");

    assert_eq!(
        result.conditions(),
        &[ShardingCondition::Values(vec![
            list("user_id", &[9]),
            range("age", 18, 65),
        ])]
    );
}

#[test]
fn unresolved_placeholder_aborts_the_call() {
    let or = OrCondition::from(vec![
        and(vec![eq("id", 1)]),
        and(vec![Condition::equal(col("id"), ConditionValue::parameter(3))]),
    ]);

    let err = optimize(&or, &[Value::Int(1)], None).expect_err("placeholder out of range");

    assert_eq!(
        err,
        OptimizeError::Condition(ConditionError::ParameterOutOfRange {
            index: 3,
            available: 1,
        })
    );
    assert_eq!(err.class(), ErrorClass::InvalidStatement);
    assert!(err.column().is_none());
}

#[test]
fn every_branch_false_reports_always_false() {
    let or = OrCondition::from(vec![
        and(vec![eq("id", 1), eq("id", 2)]),
        and(vec![between("id", 9, 1)]),
    ]);

    let result = optimize(&or, &[], None).expect("optimize");

    assert!(result.is_always_false());
}

#[test]
fn engine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}

    assert_send_sync::<OptimizeEngine>();
}
