use crate::clock::{Clock, Millis, UptimeClock};
use crate::config::FrameThresholds;
use crate::error::ConfigError;
use crate::rendering::{FrameAggregator, RenderingListener, classify_with};
use fxhash::FxHashMap;
use spdlog::debug;

/// Collects frame metrics for every screen between "started" and "paused".
///
/// Each pause closes a screen session: the frames collected since the previous
/// checkpoint are classified and handed to the listener together with the time
/// the screen spent in the foreground.
pub struct FrameMetricsTracker<A, L, C = UptimeClock> {
    aggregator: A,
    listener: L,
    clock: C,
    thresholds: FrameThresholds,
    start_times: FxHashMap<String, Millis>,
}

impl<A: FrameAggregator, L: RenderingListener> FrameMetricsTracker<A, L> {
    pub fn new(aggregator: A, listener: L) -> Self {
        Self::with_clock(aggregator, listener, UptimeClock)
    }
}

impl<A: FrameAggregator, L: RenderingListener, C: Clock> FrameMetricsTracker<A, L, C> {
    pub fn with_clock(aggregator: A, listener: L, clock: C) -> Self {
        Self {
            aggregator,
            listener,
            clock,
            thresholds: FrameThresholds::default(),
            start_times: FxHashMap::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: FrameThresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        self.thresholds = thresholds;
        Ok(self)
    }

    pub fn on_screen_started(&mut self, screen: &str) {
        self.aggregator.add(screen);
        self.start_times
            .insert(screen.to_owned(), self.clock.now_millis());
    }

    pub fn on_screen_paused(&mut self, screen: &str) {
        let Some(histogram) = self.aggregator.reset() else {
            return;
        };
        let foreground_time = self
            .start_times
            .remove(screen)
            .map(|started_at| self.clock.now_millis() - started_at);

        match classify_with(&self.thresholds, Some(&histogram), foreground_time) {
            Some(metrics) => self.listener.on_metrics_ready(screen, metrics),
            None => debug!("[{}] no frames collected", screen),
        }
    }

    pub fn on_screen_stopped(&mut self, screen: &str) {
        // Removal crashes on some devices; losing it only costs a few frames.
        if let Err(err) = self.aggregator.remove(screen) {
            debug!("[{}] ignoring frame aggregator removal failure: {}", screen, err);
        }
    }

    pub fn aggregator(&self) -> &A {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut A {
        &mut self.aggregator
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }
}
