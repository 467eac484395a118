//! Observability: optimizer telemetry (metrics) and the sink boundary.
//!
//! The optimizer never touches `metrics` directly. Every counter update
//! flows through `OptimizeEvent` and `MetricsSink`.

pub(crate) mod metrics;
pub(crate) mod sink;


// re-exports
pub use metrics::{EventOps, EventReport};
pub use sink::{
    AlwaysFalseReason, MetricsSink, OptimizeEvent, ValueShape, metrics_report, metrics_reset_all,
    with_metrics_sink,
};
pub(crate) use sink::Recorder;
