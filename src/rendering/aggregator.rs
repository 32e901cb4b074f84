use crate::clock::Millis;
use crate::error::SurfaceError;
use crate::rendering::FrameHistogram;
use fxhash::FxHashSet;
use std::mem;

/// Platform source of per-frame render durations.
pub trait FrameAggregator {
    /// Starts collecting frames of `screen`.
    fn add(&mut self, screen: &str);

    /// Takes everything collected since the previous reset. `None` when the
    /// aggregator is not collecting anything.
    fn reset(&mut self) -> Option<FrameHistogram>;

    /// Stops collecting frames of `screen`.
    fn remove(&mut self, screen: &str) -> Result<(), SurfaceError>;
}

/// Aggregator fed by hand with frame durations.
#[derive(Debug, Default)]
pub struct HistogramAggregator {
    screens: FxHashSet<String>,
    collected: FrameHistogram,
}

impl HistogramAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one frame of `screen`. Frames of screens that were not added
    /// are not collected.
    pub fn record_frame(&mut self, screen: &str, duration_ms: Millis) {
        if self.screens.contains(screen) {
            self.collected.record_frame(duration_ms);
        }
    }

    pub fn is_collecting(&self, screen: &str) -> bool {
        self.screens.contains(screen)
    }
}

impl FrameAggregator for HistogramAggregator {
    fn add(&mut self, screen: &str) {
        self.screens.insert(screen.to_owned());
    }

    fn reset(&mut self) -> Option<FrameHistogram> {
        if self.screens.is_empty() && self.collected.is_empty() {
            return None;
        }
        Some(mem::take(&mut self.collected))
    }

    fn remove(&mut self, screen: &str) -> Result<(), SurfaceError> {
        if self.screens.remove(screen) {
            Ok(())
        } else {
            Err(SurfaceError::Refused(format!("{} was never added", screen)))
        }
    }
}
