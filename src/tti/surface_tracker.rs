use crate::clock::{Clock, UptimeClock};
use crate::render_wait::wait_for_next_render;
use crate::surface::RenderSurface;
use crate::tti::{ScreenListener, ScreenTracker};
use std::rc::Rc;

/// [`ScreenTracker`] for screens drawn through a [`RenderSurface`].
///
/// A screen is only on screen once its surface has actually rendered, so the
/// ready and usable milestones are taken at the next render pass of the given
/// surface rather than at the time of the call. For screens that draw in some
/// other way, use [`ScreenTracker`] directly.
pub struct SurfaceScreenTracker<L, C = UptimeClock> {
    tracker: Rc<ScreenTracker<L, C>>,
}

impl<L, C> Clone for SurfaceScreenTracker<L, C> {
    fn clone(&self) -> Self {
        Self {
            tracker: self.tracker.clone(),
        }
    }
}

impl<L, C> SurfaceScreenTracker<L, C>
where
    L: ScreenListener + 'static,
    C: Clock + 'static,
{
    pub fn new(tracker: ScreenTracker<L, C>) -> Self {
        Self {
            tracker: Rc::new(tracker),
        }
    }

    pub fn on_screen_created(&self, screen: &str) {
        self.tracker.on_screen_created(screen);
    }

    /// The screen's surface is built but not drawn yet; TTFR is taken at its next render.
    pub fn on_screen_view_is_ready<S>(&self, screen: &str, surface: &Rc<S>)
    where
        S: RenderSurface + ?Sized + 'static,
    {
        self.when_rendered(screen, surface, |tracker, screen| {
            tracker.on_screen_view_is_ready(screen)
        });
    }

    /// The screen is ready for interaction; TTI is taken at its next render.
    /// Only the first call of a session counts.
    pub fn on_screen_is_usable<S>(&self, screen: &str, surface: &Rc<S>)
    where
        S: RenderSurface + ?Sized + 'static,
    {
        self.when_rendered(screen, surface, |tracker, screen| {
            tracker.on_screen_is_usable(screen)
        });
    }

    pub fn on_screen_stopped(&self, screen: &str) {
        self.tracker.on_screen_stopped(screen);
    }

    pub fn is_tracked(&self, screen: &str) -> bool {
        self.tracker.is_tracked(screen)
    }

    pub fn tracker(&self) -> &ScreenTracker<L, C> {
        &self.tracker
    }

    fn when_rendered<S>(
        &self,
        screen: &str,
        surface: &Rc<S>,
        milestone: fn(&ScreenTracker<L, C>, &str),
    ) where
        S: RenderSurface + ?Sized + 'static,
    {
        if !self.tracker.is_tracked(screen) {
            return;
        }
        let tracker = self.tracker.clone();
        let screen = screen.to_owned();
        wait_for_next_render(surface, move || milestone(&tracker, &screen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{ManualClock, Millis};
    use crate::sim::{MainQueue, SimSurface};
    use std::cell::RefCell;

    #[derive(Default)]
    struct Durations {
        ttfr: RefCell<Vec<Millis>>,
        tti: RefCell<Vec<Millis>>,
    }

    impl ScreenListener for Durations {
        fn on_first_frame_is_drawn(&self, _screen: &str, duration_ms: Millis) {
            self.ttfr.borrow_mut().push(duration_ms);
        }

        fn on_first_usable_frame_is_drawn(&self, _screen: &str, duration_ms: Millis) {
            self.tti.borrow_mut().push(duration_ms);
        }
    }

    #[test]
    fn test_milestone_taken_at_render_time() {
        let clock = ManualClock::new(0);
        let tracker = SurfaceScreenTracker::new(ScreenTracker::with_clock(
            Durations::default(),
            clock.clone(),
        ));
        let queue = MainQueue::new();
        let surface = SimSurface::attached(&queue);

        tracker.on_screen_created("cart");
        clock.advance(30);
        tracker.on_screen_view_is_ready("cart", &surface);
        clock.advance(20);
        surface.render_pass();

        assert_eq!(*tracker.tracker().listener().ttfr.borrow(), vec![50]);
    }

    #[test]
    fn test_untracked_screen_schedules_nothing() {
        let tracker = SurfaceScreenTracker::new(ScreenTracker::with_clock(
            Durations::default(),
            ManualClock::new(0),
        ));
        let queue = MainQueue::new();
        let surface = SimSurface::attached(&queue);

        tracker.on_screen_is_usable("never-created", &surface);
        assert_eq!(surface.listener_count(), 0);
    }
}
