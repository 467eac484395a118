use serde::Serialize;
use std::cell::RefCell;

///
/// EventState
/// Ephemeral, in-memory optimizer counters for the current thread.
///

#[derive(Clone, Debug, Default)]
pub(crate) struct EventState {
    pub(crate) ops: EventOps,
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Entrypoints
    pub optimize_calls: u64,
    pub generated_key_calls: u64,
    pub branches_seen: u64,
    pub unconstrained_results: u64,

    // Branch outcomes
    pub branches_resolved: u64,
    pub branches_always_false: u64,

    // Column outcomes
    pub list_values: u64,
    pub range_values: u64,
    pub disjoint_values: u64,
    pub inverted_ranges: u64,
    pub disjoint_ranges: u64,
    pub values_outside_range: u64,

    // Failures
    pub type_mismatches: u64,
}

///
/// EventReport
/// Point-in-time snapshot of the counters.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventReport {
    pub ops: EventOps,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

pub(crate) fn report() -> EventReport {
    with_state(|m| EventReport { ops: m.ops.clone() })
}

pub(crate) const fn bump(counter: &mut u64) {
    *counter = counter.saturating_add(1);
}
