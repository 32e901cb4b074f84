//! Slow, frozen and dropped frames per screen session.

mod aggregator;
mod histogram;
mod metrics;
mod tracker;

pub use aggregator::{FrameAggregator, HistogramAggregator};
pub use histogram::FrameHistogram;
pub use metrics::{RenderingMetrics, classify, classify_with};
pub use tracker::FrameMetricsTracker;

use std::rc::Rc;

/// Receives the rendering metrics of each finished screen session.
pub trait RenderingListener {
    fn on_metrics_ready(&self, screen: &str, metrics: RenderingMetrics);
}

impl<T: RenderingListener + ?Sized> RenderingListener for Rc<T> {
    fn on_metrics_ready(&self, screen: &str, metrics: RenderingMetrics) {
        (**self).on_metrics_ready(screen, metrics)
    }
}
