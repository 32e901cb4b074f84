use crate::clock::{Clock, Millis};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

const UNSET: Millis = Millis::MIN;

static PROCESS_RECORD: ColdStartRecord = ColdStartRecord::new();

/// Read access to the earliest instant observed in this process.
pub trait StartInstantSource {
    fn earliest_instant(&self) -> Option<Millis>;

    /// Claims the one startup report allowed per process. Only the first call
    /// returns true.
    fn try_claim_report(&self) -> bool;
}

/// Process-wide cold start bookkeeping.
///
/// Lifecycle: [`mark`](Self::mark) once from the earliest initialization hook
/// the platform offers (before application code runs, possibly on another
/// thread), then read by the startup tracker when it registers. The write is a
/// release compare-and-set and reads acquire it, so no lock is involved.
#[derive(Debug)]
pub struct ColdStartRecord {
    earliest: AtomicI64,
    report_claimed: AtomicBool,
}

impl ColdStartRecord {
    pub const fn new() -> Self {
        Self {
            earliest: AtomicI64::new(UNSET),
            report_claimed: AtomicBool::new(false),
        }
    }

    /// The record shared by the whole process.
    pub fn global() -> &'static ColdStartRecord {
        &PROCESS_RECORD
    }

    /// Stores `instant` unless an instant was already stored. Returns whether
    /// this call stored it.
    pub fn mark(&self, instant: Millis) -> bool {
        self.earliest
            .compare_exchange(UNSET, instant, Ordering::Release, Ordering::Relaxed)
            .is_ok()
    }

    pub fn mark_now<C: Clock + ?Sized>(&self, clock: &C) -> bool {
        self.mark(clock.now_millis())
    }
}

impl Default for ColdStartRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl StartInstantSource for ColdStartRecord {
    fn earliest_instant(&self) -> Option<Millis> {
        match self.earliest.load(Ordering::Acquire) {
            UNSET => None,
            instant => Some(instant),
        }
    }

    fn try_claim_report(&self) -> bool {
        !self.report_claimed.swap(true, Ordering::AcqRel)
    }
}
