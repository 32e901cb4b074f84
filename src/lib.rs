mod clock;
mod config;
mod error;
pub mod measure;
pub mod render_wait;
pub mod rendering;
pub mod sim;
pub mod startup;
pub mod surface;
pub mod tti;

pub use crate::clock::{Clock, ManualClock, Millis, UptimeClock};
pub use crate::config::{FrameThresholds, PerfConfig, StartupOptions};
pub use crate::error::{ConfigError, StatsError, SurfaceError};
pub use crate::render_wait::{wait_for_first_render, wait_for_next_render};
pub use crate::rendering::{
    FrameHistogram, FrameMetricsTracker, RenderingListener, RenderingMetrics, classify,
    classify_with,
};
pub use crate::startup::{ColdStartRecord, StartupListener, StartupTimeTracker};
pub use crate::surface::{RenderSurface, SurfaceHost};
pub use crate::tti::{ScreenListener, ScreenTracker, SurfaceScreenTracker};
