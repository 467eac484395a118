//! Structured log helpers. Every line goes to one target and starts with
//! `event=<name>` so log pipelines can filter on the event name.

/// Single logging target for shardcond.
pub(crate) const LOG_TARGET: &str = "shardcond";

macro_rules! shard_log {
    ($level:expr, $event:expr, $fmt:expr $(, $args:expr)* $(,)?) => {{
        if log::log_enabled!(target: crate::logging::LOG_TARGET, $level) {
            log::log!(
                target: crate::logging::LOG_TARGET,
                $level,
                "event={} {}",
                $event,
                format_args!($fmt $(, $args)*)
            );
        }
    }};
}

pub(crate) use shard_log;
