use crate::clock::Clock;
use crate::surface::RenderSurface;
use crate::tti::{ScreenListener, SurfaceScreenTracker};
use std::marker::PhantomData;
use std::rc::Rc;

/// Names a screen by its Rust type, e.g. `my_app::screens::Checkout`.
pub fn type_name_provider<S>() -> fn(&S) -> Option<String> {
    |_| Some(std::any::type_name::<S>().to_owned())
}

/// Collects TTFR for every screen of a kind by following its lifecycle
/// callbacks. Hook the three `on_screen_*` methods into the platform's
/// lifecycle notifications for screens of type `S`.
///
/// `screen_name` maps a screen to its tracking key; returning `None` leaves
/// that screen untracked.
pub struct TtfrHelper<S: ?Sized, L, C, F> {
    tracker: SurfaceScreenTracker<L, C>,
    screen_name: F,
    _phantom: PhantomData<fn(&S)>,
}

impl<S, L, C> TtfrHelper<S, L, C, fn(&S) -> Option<String>>
where
    L: ScreenListener + 'static,
    C: Clock + 'static,
{
    pub fn with_type_names(tracker: SurfaceScreenTracker<L, C>) -> Self {
        Self::new(tracker, type_name_provider::<S>())
    }
}

impl<S, L, C, F> TtfrHelper<S, L, C, F>
where
    S: ?Sized,
    L: ScreenListener + 'static,
    C: Clock + 'static,
    F: Fn(&S) -> Option<String>,
{
    pub fn new(tracker: SurfaceScreenTracker<L, C>, screen_name: F) -> Self {
        Self {
            tracker,
            screen_name,
            _phantom: PhantomData,
        }
    }

    /// Before the screen's own creation code runs.
    pub fn on_screen_pre_created(&self, screen: &S) {
        if let Some(key) = (self.screen_name)(screen) {
            self.tracker.on_screen_created(&key);
        }
    }

    /// The screen became visible. `root` is its root surface, if it has one;
    /// screens without a surface are skipped.
    pub fn on_screen_started<R>(&self, screen: &S, root: Option<&Rc<R>>)
    where
        R: RenderSurface + ?Sized + 'static,
    {
        let Some(key) = (self.screen_name)(screen) else {
            return;
        };
        if let Some(root) = root {
            self.tracker.on_screen_view_is_ready(&key, root);
        }
    }

    pub fn on_screen_stopped(&self, screen: &S) {
        if let Some(key) = (self.screen_name)(screen) {
            self.tracker.on_screen_stopped(&key);
        }
    }

    pub fn tracker(&self) -> &SurfaceScreenTracker<L, C> {
        &self.tracker
    }
}
