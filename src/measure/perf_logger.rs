use crate::clock::Millis;
use crate::measure::{DurationStats, DurationSummary};
use crate::rendering::{RenderingListener, RenderingMetrics};
use crate::startup::StartupListener;
use crate::tti::ScreenListener;
use spdlog::{info, warn};
use std::cell::RefCell;

pub const STARTUP_KEY: &str = "startup";

pub fn ttfr_key(screen: &str) -> String {
    format!("ttfr/{}", screen)
}

pub fn tti_key(screen: &str) -> String {
    format!("tti/{}", screen)
}

/// Listener that logs every metric and keeps duration distributions.
///
/// Implements all three listener traits, so one shared instance
/// (`Rc<PerfLogger>`) can be handed to every tracker.
#[derive(Default)]
pub struct PerfLogger {
    stats: RefCell<DurationStats>,
    last_rendering: RefCell<Vec<(String, RenderingMetrics)>>,
}

impl PerfLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn summary(&self, key: &str) -> Option<DurationSummary> {
        self.stats.borrow().summary(key)
    }

    /// Rendering metrics reported so far, oldest first.
    pub fn rendering_reports(&self) -> Vec<(String, RenderingMetrics)> {
        self.last_rendering.borrow().clone()
    }

    /// One line per recorded key.
    pub fn report(&self) -> String {
        let stats = self.stats.borrow();
        stats
            .keys()
            .into_iter()
            .map(|key| format!("[{}]{}", key, stats.format_stats(key)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn record(&self, key: &str, duration_ms: Millis) {
        if let Err(err) = self.stats.borrow_mut().record(key, duration_ms) {
            warn!("[{}] duration not recorded: {}", key, err);
        }
    }
}

impl ScreenListener for PerfLogger {
    fn on_first_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        info!("{} - TTFR = {}ms", screen, duration_ms);
        self.record(&ttfr_key(screen), duration_ms);
    }

    fn on_first_usable_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        info!("{} - TTI = {}ms", screen, duration_ms);
        self.record(&tti_key(screen), duration_ms);
    }
}

impl RenderingListener for PerfLogger {
    fn on_metrics_ready(&self, screen: &str, metrics: RenderingMetrics) {
        info!("Frame metrics for [{}] are collected: {}", screen, metrics);
        self.last_rendering
            .borrow_mut()
            .push((screen.to_owned(), metrics));
    }
}

impl StartupListener for PerfLogger {
    fn on_cold_startup_time_is_ready(
        &self,
        duration_ms: Millis,
        first_screen: &str,
        is_actual_cold_start: bool,
    ) {
        info!(
            "Startup time = {}ms (first screen: {}, cold: {})",
            duration_ms, first_screen, is_actual_cold_start
        );
        self.record(STARTUP_KEY, duration_ms);
    }
}
