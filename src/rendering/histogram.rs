use crate::clock::Millis;
use std::collections::BTreeMap;

/// Frame counts per render duration, ordered by duration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameHistogram {
    buckets: BTreeMap<Millis, u64>,
}

impl FrameHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` frames that took `duration_ms` each.
    pub fn record(&mut self, duration_ms: Millis, count: u64) {
        if count == 0 {
            return;
        }
        let bucket = self.buckets.entry(duration_ms).or_insert(0);
        *bucket = bucket.saturating_add(count);
    }

    pub fn record_frame(&mut self, duration_ms: Millis) {
        self.record(duration_ms, 1);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Millis, u64)> + '_ {
        self.buckets.iter().map(|(duration, count)| (*duration, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Number of distinct durations.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }
}

impl FromIterator<(Millis, u64)> for FrameHistogram {
    fn from_iter<I: IntoIterator<Item = (Millis, u64)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (duration_ms, count) in iter {
            histogram.record(duration_ms, count);
        }
        histogram
    }
}

impl<const N: usize> From<[(Millis, u64); N]> for FrameHistogram {
    fn from(samples: [(Millis, u64); N]) -> Self {
        samples.into_iter().collect()
    }
}
