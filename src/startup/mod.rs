//! Cold start time.

mod baseline;
mod process;
mod record;
mod tracker;

pub use baseline::{compute_startup_time, select_baseline};
pub use process::{ProcessInfo, StaticProcessInfo};
pub use record::{ColdStartRecord, StartInstantSource};
pub use tracker::StartupTimeTracker;

use crate::clock::Millis;
use std::rc::Rc;

pub trait StartupListener {
    /// The app's startup time is known.
    ///
    /// `is_actual_cold_start` is false when the first screen was restored from
    /// saved state; such a launch is one of the warm start scenarios.
    fn on_cold_startup_time_is_ready(
        &self,
        duration_ms: Millis,
        first_screen: &str,
        is_actual_cold_start: bool,
    );
}

impl<T: StartupListener + ?Sized> StartupListener for Rc<T> {
    fn on_cold_startup_time_is_ready(
        &self,
        duration_ms: Millis,
        first_screen: &str,
        is_actual_cold_start: bool,
    ) {
        (**self).on_cold_startup_time_is_ready(duration_ms, first_screen, is_actual_cold_start)
    }
}
