use std::sync::Arc;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Instant;

/// Milliseconds read from an uptime clock. Durations use the same unit.
pub type Millis = i64;

static PROCESS_EPOCH: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Source of timestamps for every measurement in the crate.
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Monotonic clock counting from the first time any `UptimeClock` is read.
///
/// Backed by `Instant`, which does not advance while the device is suspended,
/// so a deep sleep between two lifecycle events never inflates a duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct UptimeClock;

impl UptimeClock {
    /// Pins the epoch. Call from the earliest initialization hook so that later
    /// readings are not all near zero.
    pub fn init() {
        LazyLock::force(&PROCESS_EPOCH);
    }

    /// Converts `instant` into this clock's time base. Instants before the
    /// epoch, such as the moment the OS started the process, come out negative.
    pub fn millis_at(instant: Instant) -> Millis {
        let epoch = *PROCESS_EPOCH;
        if instant >= epoch {
            instant.duration_since(epoch).as_millis() as Millis
        } else {
            -(epoch.duration_since(instant).as_millis() as Millis)
        }
    }
}

impl Clock for UptimeClock {
    #[inline(always)]
    fn now_millis(&self) -> Millis {
        PROCESS_EPOCH.elapsed().as_millis() as Millis
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start)),
        }
    }

    pub fn set(&self, now: Millis) {
        self.now.store(now, Ordering::Release);
    }

    pub fn advance(&self, by: Millis) {
        self.now.fetch_add(by, Ordering::AcqRel);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_manual_clock_shared_between_clones() {
        let clock = ManualClock::new(100);
        let other = clock.clone();

        clock.advance(50);
        assert_eq!(other.now_millis(), 150);

        other.set(10);
        assert_eq!(clock.now_millis(), 10);
    }

    #[test]
    fn test_uptime_clock_is_monotonic() {
        UptimeClock::init();
        let clock = UptimeClock;
        let first = clock.now_millis();
        thread::sleep(Duration::from_millis(5));
        let second = clock.now_millis();
        assert!(second >= first + 5);
    }

    #[test]
    fn test_uptime_clock_converts_instants() {
        UptimeClock::init();
        let epoch = *PROCESS_EPOCH;

        assert_eq!(UptimeClock::millis_at(epoch), 0);
        assert_eq!(UptimeClock::millis_at(epoch + Duration::from_millis(250)), 250);
        if let Some(before) = epoch.checked_sub(Duration::from_millis(40)) {
            assert_eq!(UptimeClock::millis_at(before), -40);
        }

        let now = UptimeClock.now_millis();
        assert!(UptimeClock::millis_at(Instant::now()) >= now);
    }
}
