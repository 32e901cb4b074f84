//! Time to first render (TTFR) and time to interactive (TTI) per screen.

mod helper;
mod surface_tracker;
mod tracker;

pub use helper::{TtfrHelper, type_name_provider};
pub use surface_tracker::SurfaceScreenTracker;
pub use tracker::{ScreenTracker, SessionState};

use crate::clock::Millis;
use std::rc::Rc;

/// Receives screen milestones. Called on the UI thread.
pub trait ScreenListener {
    /// The creation of `screen` was recorded.
    fn on_screen_created(&self, _screen: &str) {}

    /// `duration_ms` elapsed between creation and the first drawn frame.
    fn on_first_frame_is_drawn(&self, screen: &str, duration_ms: Millis);

    /// `duration_ms` elapsed between creation and the first usable frame.
    fn on_first_usable_frame_is_drawn(&self, screen: &str, duration_ms: Millis);
}

impl<T: ScreenListener + ?Sized> ScreenListener for Rc<T> {
    fn on_screen_created(&self, screen: &str) {
        (**self).on_screen_created(screen)
    }

    fn on_first_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        (**self).on_first_frame_is_drawn(screen, duration_ms)
    }

    fn on_first_usable_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        (**self).on_first_usable_frame_is_drawn(screen, duration_ms)
    }
}
