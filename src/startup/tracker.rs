use crate::clock::{Clock, Millis};
use crate::config::StartupOptions;
use crate::render_wait::wait_for_first_render;
use crate::startup::{ProcessInfo, StartInstantSource, StartupListener, select_baseline};
use crate::surface::SurfaceHost;
use spdlog::debug;
use std::cell::Cell;
use std::rc::Rc;

struct StartupState<L, C> {
    listener: L,
    clock: C,
    app_start: Millis,
    interrupted: Cell<bool>,
    reported: Cell<bool>,
}

/// Measures cold start: from the earliest moment of process creation until the
/// first frame of the first screen is drawn.
///
/// Created by [`register`](Self::register) from the app creation hook; then
/// feed it the first screen's lifecycle. At most one report is produced per
/// process, and none at all for background starts or interrupted launches.
pub struct StartupTimeTracker<L, C> {
    state: Rc<StartupState<L, C>>,
}

impl<L, C> Clone for StartupTimeTracker<L, C> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<L, C> StartupTimeTracker<L, C>
where
    L: StartupListener + 'static,
    C: Clock + 'static,
{
    /// Starts tracking. Call as early as possible from app creation.
    ///
    /// Returns `None` when the process is not in the foreground or when this
    /// process already registered a tracker.
    pub fn register<P, R>(
        process: &P,
        record: &R,
        listener: L,
        clock: C,
        options: StartupOptions,
    ) -> Option<Self>
    where
        P: ProcessInfo + ?Sized,
        R: StartInstantSource + ?Sized,
    {
        if !process.is_foreground() {
            debug!("process is not in foreground, skipping startup tracking");
            return None;
        }
        if !record.try_claim_report() {
            debug!("startup tracking was already registered in this process");
            return None;
        }

        let on_create = clock.now_millis();
        let fallback = record.earliest_instant().unwrap_or(on_create);
        let app_start = select_baseline(
            on_create,
            process.start_uptime_millis(),
            fallback,
            &options,
        );

        Some(Self {
            state: Rc::new(StartupState {
                listener,
                clock,
                app_start,
                interrupted: Cell::new(false),
                reported: Cell::new(false),
            }),
        })
    }

    /// A screen was created. `restored` is true when it is rebuilt from saved
    /// state, which makes this launch a warm start rather than a cold one.
    pub fn on_screen_created<H>(&self, screen: &str, host: &Rc<H>, restored: bool)
    where
        H: SurfaceHost + ?Sized + 'static,
    {
        if self.is_finished() {
            return;
        }
        let state = self.state.clone();
        let screen = screen.to_owned();
        wait_for_first_render(host, move || state.on_first_render(&screen, restored));
    }

    /// A screen was paused. Before the first frame this means the launch did
    /// not go straight to a screen, and the measurement is dropped.
    pub fn on_screen_paused(&self) {
        if !self.state.reported.get() && !self.state.interrupted.replace(true) {
            debug!("screen paused before its first frame, startup tracking cancelled");
        }
    }

    /// True once the startup time was reported or tracking was cancelled.
    pub fn is_finished(&self) -> bool {
        self.state.reported.get() || self.state.interrupted.get()
    }

    /// Instant the startup time is measured from.
    pub fn app_start(&self) -> Millis {
        self.state.app_start
    }

    pub fn listener(&self) -> &L {
        &self.state.listener
    }
}

impl<L: StartupListener, C: Clock> StartupState<L, C> {
    fn on_first_render(&self, screen: &str, restored: bool) {
        if self.interrupted.get() || self.reported.replace(true) {
            return;
        }
        let duration = self.clock.now_millis() - self.app_start;
        self.listener
            .on_cold_startup_time_is_ready(duration, screen, !restored);
    }
}
