use crate::clock::Millis;
use crate::error::StatsError;
use fxhash::FxHashMap;
use hdrhistogram::Histogram;

/// Longest duration kept at full precision: one hour.
const MAX_TRACKABLE_MS: u64 = 3_600_000;

/// Summary of the durations recorded under one key, in milliseconds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationSummary {
    pub count: u64,
    pub min: u64,
    pub max: u64,
    pub mean: f64,
    pub p50: u64,
    pub p90: u64,
    pub p99: u64,
}

/// Millisecond duration distributions keyed by metric name, e.g. `ttfr/home`.
#[derive(Default)]
pub struct DurationStats {
    histograms: FxHashMap<String, Histogram<u64>>,
}

impl DurationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `duration_ms` under `key`. Values are clamped into
    /// `1..=MAX_TRACKABLE_MS`; negative durations only come from clock misuse.
    pub fn record(&mut self, key: &str, duration_ms: Millis) -> Result<(), StatsError> {
        let value = duration_ms.clamp(1, MAX_TRACKABLE_MS as Millis) as u64;
        if let Some(histogram) = self.histograms.get_mut(key) {
            histogram.saturating_record(value);
            return Ok(());
        }

        // 3 significant figures
        let mut histogram = Histogram::<u64>::new_with_bounds(1, MAX_TRACKABLE_MS, 3)?;
        histogram.saturating_record(value);
        self.histograms.insert(key.to_owned(), histogram);
        Ok(())
    }

    pub fn summary(&self, key: &str) -> Option<DurationSummary> {
        let histogram = self.histograms.get(key)?;
        if histogram.is_empty() {
            return None;
        }
        Some(DurationSummary {
            count: histogram.len(),
            min: histogram.min(),
            max: histogram.max(),
            mean: histogram.mean(),
            p50: histogram.value_at_quantile(0.5),
            p90: histogram.value_at_quantile(0.9),
            p99: histogram.value_at_quantile(0.99),
        })
    }

    /// Recorded keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.histograms.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn format_stats(&self, key: &str) -> String {
        let Some(stats) = self.summary(key) else {
            return "No stats collected yet".into();
        };

        format!(
            "\tcount={},\tmin={},\tmax={},\tmean={},\tp50={},\tp90={},\tp99={}",
            stats.count,
            format_millis(stats.min as f64),
            format_millis(stats.max as f64),
            format_millis(stats.mean),
            format_millis(stats.p50 as f64),
            format_millis(stats.p90 as f64),
            format_millis(stats.p99 as f64),
        )
    }

    pub fn reset(&mut self) {
        self.histograms.clear();
    }
}

fn format_millis(millis: f64) -> String {
    if millis < 1000.0 {
        format!("{:.0}ms", millis)
    } else if millis < 60_000.0 {
        format!("{:.2}s", millis / 1000.0)
    } else {
        format!("{:.1}min", millis / 60_000.0)
    }
}
