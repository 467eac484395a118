//! shardcond: sharding-condition optimizer for SQL sharding middleware.
//!
//! This is the public meta-crate. Downstream users depend on **shardcond** only.
//!
//! It re-exports the stable public API from:
//!   - `shardcond-core`   (condition model, optimizer, sharding results, metrics)
//!   - `shardcond-config` (optimizer configuration)

pub use shardcond_config as config;
pub use shardcond_core as core;

pub use shardcond_config::{ConfigError, OptimizerConfig, ParameterBase};
pub use shardcond_core::{
    ErrorClass, OptimizeError,
    obs::{EventReport, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
    optimizer::optimize,
};

/// Crate version, as published.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Prelude
//

pub mod prelude {
    pub use crate::{OptimizerConfig, ParameterBase};
    pub use shardcond_core::prelude::*;
}
