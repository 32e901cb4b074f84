use crate::clock::{Clock, Millis, UptimeClock};
use crate::tti::ScreenListener;
use fxhash::FxHashMap;
use spdlog::debug;
use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Creation recorded, nothing drawn yet.
    Created,
    /// First frame reported; waiting for the usable frame.
    Rendered,
}

#[derive(Debug, Clone, Copy)]
struct ScreenSession {
    created_at: Millis,
    state: SessionState,
}

/// Turns screen lifecycle events into TTFR and TTI durations.
///
/// Works with any kind of screen as long as the calls follow its lifecycle:
/// 1. [`on_screen_created`](Self::on_screen_created) as early as possible,
/// 2. [`on_screen_view_is_ready`](Self::on_screen_view_is_ready) once the first frame is shown,
/// 3. optionally [`on_screen_is_usable`](Self::on_screen_is_usable) once meaningful content is shown.
///
/// A session ends on the usable milestone or on
/// [`on_screen_stopped`](Self::on_screen_stopped); milestones for a screen
/// without a session are ignored.
pub struct ScreenTracker<L, C = UptimeClock> {
    listener: L,
    clock: C,
    sessions: RefCell<FxHashMap<String, ScreenSession>>,
}

impl<L: ScreenListener> ScreenTracker<L> {
    pub fn new(listener: L) -> Self {
        Self::with_clock(listener, UptimeClock)
    }
}

impl<L: ScreenListener, C: Clock> ScreenTracker<L, C> {
    pub fn with_clock(listener: L, clock: C) -> Self {
        Self {
            listener,
            clock,
            sessions: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn on_screen_created(&self, screen: &str) {
        let now = self.clock.now_millis();
        self.on_screen_created_at(screen, now);
    }

    /// Starts (or restarts) the session of `screen` at `timestamp`.
    pub fn on_screen_created_at(&self, screen: &str, timestamp: Millis) {
        self.sessions.borrow_mut().insert(
            screen.to_owned(),
            ScreenSession {
                created_at: timestamp,
                state: SessionState::Created,
            },
        );
        self.listener.on_screen_created(screen);
    }

    /// Reports the first frame of `screen`. Only the first call per session counts.
    pub fn on_screen_view_is_ready(&self, screen: &str) {
        let now = self.clock.now_millis();
        let created_at = {
            let mut sessions = self.sessions.borrow_mut();
            match sessions.get_mut(screen) {
                Some(session) if session.state == SessionState::Created => {
                    session.state = SessionState::Rendered;
                    session.created_at
                }
                Some(_) => return,
                None => {
                    debug!("[{}] first frame without an open session", screen);
                    return;
                }
            }
        };
        self.listener.on_first_frame_is_drawn(screen, now - created_at);
    }

    /// Reports the first usable frame of `screen` and closes its session.
    pub fn on_screen_is_usable(&self, screen: &str) {
        let now = self.clock.now_millis();
        let session = self.sessions.borrow_mut().remove(screen);
        match session {
            Some(session) => {
                self.listener
                    .on_first_usable_frame_is_drawn(screen, now - session.created_at);
            }
            None => debug!("[{}] usable frame without an open session", screen),
        }
    }

    /// Drops the session of `screen`.
    ///
    /// Call when the user leaves the screen, so that a cheap return to an
    /// already built screen (back navigation) is not reported as a slow creation.
    pub fn on_screen_stopped(&self, screen: &str) {
        self.sessions.borrow_mut().remove(screen);
    }

    /// True while `screen` still has milestones to report.
    pub fn is_tracked(&self, screen: &str) -> bool {
        self.sessions.borrow().contains_key(screen)
    }

    pub fn state(&self, screen: &str) -> Option<SessionState> {
        self.sessions.borrow().get(screen).map(|session| session.state)
    }

    /// Number of open sessions. Keeps growing if screens are never stopped.
    pub fn pending_sessions(&self) -> usize {
        self.sessions.borrow().len()
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
