use crate::clock::Millis;
use crate::config::FrameThresholds;
use crate::rendering::FrameHistogram;
use std::fmt;

/// Rendering quality of one screen session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderingMetrics {
    /// Frames rendered during the session.
    pub total_frames: u64,
    /// Frames slower than the slow threshold (16ms).
    pub slow_frames: u64,
    /// Frames slower than the frozen threshold (700ms).
    pub frozen_frames: u64,
    /// Frame slots the slow frames occupied.
    ///
    /// A 48ms frame takes the time of three 16ms frames, so it adds 3 here.
    /// The rendered frame itself is not subtracted; consumers compare this
    /// number across releases, so the formula must stay as is.
    pub dropped_frames: u64,
    /// Sum of the durations of all slow frames.
    pub total_freeze_time_ms: u64,
    /// Time the screen spent in the foreground. Context only: a longer visit
    /// can explain a higher freeze time.
    pub foreground_time_ms: Option<Millis>,
}

impl fmt::Display for RenderingMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={}, slow={}, frozen={}, dropped={}, freeze={}ms",
            self.total_frames,
            self.slow_frames,
            self.frozen_frames,
            self.dropped_frames,
            self.total_freeze_time_ms
        )?;
        if let Some(foreground) = self.foreground_time_ms {
            write!(f, ", foreground={}ms", foreground)?;
        }
        Ok(())
    }
}

/// Classifies `histogram` with the default thresholds.
///
/// `None` means nothing was collected. Negative durations and durations of
/// 5s or more are device artifacts and are left out of every aggregate.
pub fn classify(
    histogram: Option<&FrameHistogram>,
    foreground_time_ms: Option<Millis>,
) -> Option<RenderingMetrics> {
    classify_with(&FrameThresholds::default(), histogram, foreground_time_ms)
}

pub fn classify_with(
    thresholds: &FrameThresholds,
    histogram: Option<&FrameHistogram>,
    foreground_time_ms: Option<Millis>,
) -> Option<RenderingMetrics> {
    let histogram = histogram.filter(|histogram| !histogram.is_empty())?;

    let mut metrics = RenderingMetrics {
        foreground_time_ms,
        ..Default::default()
    };

    for (duration_ms, count) in histogram.iter() {
        if !thresholds.is_valid(duration_ms) {
            continue;
        }
        let duration = duration_ms as u64;

        // Counts come from the platform unchecked; saturate instead of overflowing.
        metrics.total_frames = metrics.total_frames.saturating_add(count);
        if duration_ms > thresholds.frozen_ms {
            metrics.frozen_frames = metrics.frozen_frames.saturating_add(count);
        }
        if duration_ms > thresholds.slow_ms {
            metrics.slow_frames = metrics.slow_frames.saturating_add(count);
            metrics.total_freeze_time_ms = metrics
                .total_freeze_time_ms
                .saturating_add(duration.saturating_mul(count));
        }
        let slots = duration.checked_div(thresholds.slow_ms as u64).unwrap_or(0);
        metrics.dropped_frames = metrics
            .dropped_frames
            .saturating_add(slots.saturating_mul(count));
    }

    Some(metrics)
}
