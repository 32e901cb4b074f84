pub mod duration_stats;
mod perf_logger;

pub use duration_stats::{DurationStats, DurationSummary};
pub use perf_logger::{PerfLogger, STARTUP_KEY, ttfr_key, tti_key};
