//! Metrics sink boundary.
//!
//! Optimizer logic MUST NOT depend on obs::metrics directly.
//! All instrumentation flows through OptimizeEvent and MetricsSink.
use crate::obs::metrics::{self, EventReport, bump};
use std::cell::RefCell;

thread_local! {
    static SINK_OVERRIDE: RefCell<Option<*const dyn MetricsSink>> = RefCell::new(None);
}

///
/// ValueShape
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueShape {
    List,
    Range,
}

///
/// AlwaysFalseReason
/// Why one column's predicates cannot hold together.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AlwaysFalseReason {
    /// `=` / `IN` sets share no value.
    DisjointValues,
    /// A `BETWEEN` had its lower bound above its upper bound.
    InvertedRange,
    /// Two `BETWEEN` ranges do not overlap.
    DisjointRanges,
    /// No `=` / `IN` value falls inside the `BETWEEN` range.
    ValuesOutsideRange,
}

///
/// OptimizeEvent
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OptimizeEvent {
    OptimizeStart { branches: u64, generated_key: bool },
    Unconstrained,
    ColumnResolved { shape: ValueShape },
    ColumnAlwaysFalse { reason: AlwaysFalseReason },
    BranchResolved { values: u64 },
    BranchAlwaysFalse,
    TypeMismatch,
}

///
/// MetricsSink
///

pub trait MetricsSink {
    fn record(&self, event: OptimizeEvent);
}

/// GlobalMetricsSink
/// Default sink that writes into the thread-local counters.
/// Acts as the concrete sink when no scoped override is installed.

pub(crate) struct GlobalMetricsSink;

impl MetricsSink for GlobalMetricsSink {
    fn record(&self, event: OptimizeEvent) {
        metrics::with_state_mut(|m| {
            let ops = &mut m.ops;
            match event {
                OptimizeEvent::OptimizeStart {
                    branches,
                    generated_key,
                } => {
                    bump(&mut ops.optimize_calls);
                    ops.branches_seen = ops.branches_seen.saturating_add(branches);
                    if generated_key {
                        bump(&mut ops.generated_key_calls);
                    }
                }
                OptimizeEvent::Unconstrained => bump(&mut ops.unconstrained_results),
                OptimizeEvent::ColumnResolved { shape } => match shape {
                    ValueShape::List => bump(&mut ops.list_values),
                    ValueShape::Range => bump(&mut ops.range_values),
                },
                OptimizeEvent::ColumnAlwaysFalse { reason } => match reason {
                    AlwaysFalseReason::DisjointValues => bump(&mut ops.disjoint_values),
                    AlwaysFalseReason::InvertedRange => bump(&mut ops.inverted_ranges),
                    AlwaysFalseReason::DisjointRanges => bump(&mut ops.disjoint_ranges),
                    AlwaysFalseReason::ValuesOutsideRange => {
                        bump(&mut ops.values_outside_range);
                    }
                },
                OptimizeEvent::BranchResolved { .. } => bump(&mut ops.branches_resolved),
                OptimizeEvent::BranchAlwaysFalse => bump(&mut ops.branches_always_false),
                OptimizeEvent::TypeMismatch => bump(&mut ops.type_mismatches),
            }
        });
    }
}

pub(crate) const GLOBAL_METRICS_SINK: GlobalMetricsSink = GlobalMetricsSink;

pub(crate) fn record(event: OptimizeEvent) {
    let override_ptr = SINK_OVERRIDE.with(|cell| *cell.borrow());
    if let Some(ptr) = override_ptr {
        // SAFETY:
        // - `ptr` was produced from a valid `&dyn MetricsSink` in `with_metrics_sink`,
        //   which restores the previous slot on every exit, including unwind.
        // - `record` is synchronous and never stores `ptr` beyond this call.
        // - Only a shared reference is materialized, matching the borrow used to
        //   install the override.
        unsafe { (&*ptr).record(event) };
    } else {
        GLOBAL_METRICS_SINK.record(event);
    }
}

/// Snapshot the current thread's optimizer counters.
#[must_use]
pub fn metrics_report() -> EventReport {
    metrics::report()
}

/// Reset the current thread's optimizer counters.
pub fn metrics_reset_all() {
    metrics::reset_all();
}

/// Run a closure with a temporary metrics sink override.
pub fn with_metrics_sink<T>(sink: &dyn MetricsSink, f: impl FnOnce() -> T) -> T {
    struct Guard(Option<*const dyn MetricsSink>);

    impl Drop for Guard {
        fn drop(&mut self) {
            SINK_OVERRIDE.with(|cell| {
                *cell.borrow_mut() = self.0;
            });
        }
    }

    // SAFETY:
    // - `sink_ptr` is installed only for this dynamic scope; `Guard` restores
    //   the previous slot on all exits, including panic.
    // - `record` only dereferences synchronously and never persists `sink_ptr`.
    // - The lifetime is erased, but access stays shared-only.
    let sink_ptr = unsafe { std::mem::transmute::<&dyn MetricsSink, *const dyn MetricsSink>(sink) };
    let prev = SINK_OVERRIDE.with(|cell| {
        let mut slot = cell.borrow_mut();
        slot.replace(sink_ptr)
    });
    let _guard = Guard(prev);

    f()
}

///
/// Recorder
/// Config-gated handle the optimizer records through.
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct Recorder {
    enabled: bool,
}

impl Recorder {
    pub(crate) const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub(crate) fn record(self, event: OptimizeEvent) {
        if self.enabled {
            record(event);
        }
    }
}
