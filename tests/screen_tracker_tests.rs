use perf_suite::sim::{MainQueue, SimSurface};
use perf_suite::{ManualClock, Millis, ScreenListener, ScreenTracker, SurfaceScreenTracker};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Created(String),
    FirstFrame(String, Millis),
    Usable(String, Millis),
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn milestones(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| !matches!(event, Event::Created(_)))
            .collect()
    }
}

impl ScreenListener for Recorder {
    fn on_screen_created(&self, screen: &str) {
        self.events.borrow_mut().push(Event::Created(screen.into()));
    }

    fn on_first_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        self.events
            .borrow_mut()
            .push(Event::FirstFrame(screen.into(), duration_ms));
    }

    fn on_first_usable_frame_is_drawn(&self, screen: &str, duration_ms: Millis) {
        self.events
            .borrow_mut()
            .push(Event::Usable(screen.into(), duration_ms));
    }
}

fn setup() -> (Rc<Recorder>, ManualClock, ScreenTracker<Rc<Recorder>, ManualClock>) {
    let recorder = Rc::new(Recorder::default());
    let clock = ManualClock::new(10_000);
    let tracker = ScreenTracker::with_clock(recorder.clone(), clock.clone());
    (recorder, clock, tracker)
}

#[test]
fn test_unknown_screen_produces_no_milestones() {
    let (recorder, _clock, tracker) = setup();

    for screen in ["home", "search", ""] {
        tracker.on_screen_view_is_ready(screen);
        tracker.on_screen_is_usable(screen);
    }

    assert!(recorder.events().is_empty());
    assert_eq!(tracker.pending_sessions(), 0);
}

#[test]
fn test_usable_fires_at_most_once_per_creation() {
    let (recorder, clock, tracker) = setup();

    tracker.on_screen_created("home");
    for _ in 0..5 {
        clock.advance(10);
        tracker.on_screen_is_usable("home");
    }

    assert_eq!(
        recorder.milestones(),
        vec![Event::Usable("home".into(), 10)]
    );

    // A new creation opens a new session.
    tracker.on_screen_created("home");
    clock.advance(25);
    tracker.on_screen_is_usable("home");
    tracker.on_screen_is_usable("home");

    assert_eq!(
        recorder.milestones(),
        vec![
            Event::Usable("home".into(), 10),
            Event::Usable("home".into(), 25)
        ]
    );
}

#[test]
fn test_stopped_suppresses_later_milestones() {
    let (recorder, clock, tracker) = setup();

    tracker.on_screen_created("detail");
    clock.advance(50);
    tracker.on_screen_stopped("detail");
    tracker.on_screen_view_is_ready("detail");
    tracker.on_screen_is_usable("detail");

    assert_eq!(recorder.events(), vec![Event::Created("detail".into())]);
    assert!(!tracker.is_tracked("detail"));
}

#[test]
fn test_rendered_session_still_reports_usable() {
    let (recorder, clock, tracker) = setup();

    tracker.on_screen_created("feed");
    clock.advance(100);
    tracker.on_screen_view_is_ready("feed");
    assert!(tracker.is_tracked("feed"));
    clock.advance(300);
    tracker.on_screen_is_usable("feed");

    assert_eq!(
        recorder.milestones(),
        vec![
            Event::FirstFrame("feed".into(), 100),
            Event::Usable("feed".into(), 400)
        ]
    );
}

#[test]
fn test_sessions_are_independent() {
    let (recorder, clock, tracker) = setup();

    tracker.on_screen_created("a");
    clock.advance(10);
    tracker.on_screen_created("b");
    clock.advance(10);
    tracker.on_screen_stopped("a");
    tracker.on_screen_is_usable("b");
    tracker.on_screen_is_usable("a");

    assert_eq!(recorder.milestones(), vec![Event::Usable("b".into(), 10)]);
}

#[test]
fn test_stopped_before_render_completes() {
    let (recorder, clock, tracker) = setup();
    let tracker = SurfaceScreenTracker::new(tracker);
    let queue = MainQueue::new();
    let surface = SimSurface::attached(&queue);

    tracker.on_screen_created("profile");
    tracker.on_screen_view_is_ready("profile", &surface);
    assert_eq!(surface.listener_count(), 1);

    tracker.on_screen_stopped("profile");
    clock.advance(40);
    surface.render_pass();
    queue.run_pending();

    assert!(recorder.milestones().is_empty());
    assert_eq!(surface.listener_count(), 0);
}

#[test]
fn test_surface_tracker_usable_measured_at_next_render() {
    let (recorder, clock, tracker) = setup();
    let tracker = SurfaceScreenTracker::new(tracker);
    let queue = MainQueue::new();
    let surface = SimSurface::attached(&queue);

    tracker.on_screen_created("orders");
    tracker.on_screen_view_is_ready("orders", &surface);
    clock.advance(16);
    surface.render_pass();
    queue.run_pending();

    clock.advance(500);
    tracker.on_screen_is_usable("orders", &surface);
    tracker.on_screen_is_usable("orders", &surface);
    clock.advance(16);
    surface.render_pass();
    queue.run_pending();

    assert_eq!(
        recorder.milestones(),
        vec![
            Event::FirstFrame("orders".into(), 16),
            Event::Usable("orders".into(), 532)
        ]
    );
    assert!(!tracker.is_tracked("orders"));
}

#[test]
fn test_listener_may_reenter_tracker() {
    struct Chained {
        tracker: RefCell<Option<Rc<ScreenTracker<Rc<Chained>, ManualClock>>>>,
        usable: RefCell<Vec<Millis>>,
    }

    impl ScreenListener for Chained {
        fn on_first_frame_is_drawn(&self, screen: &str, _duration_ms: Millis) {
            let tracker = self.tracker.borrow().clone();
            if let Some(tracker) = tracker {
                tracker.on_screen_is_usable(screen);
            }
        }

        fn on_first_usable_frame_is_drawn(&self, _screen: &str, duration_ms: Millis) {
            self.usable.borrow_mut().push(duration_ms);
        }
    }

    let listener = Rc::new(Chained {
        tracker: RefCell::new(None),
        usable: RefCell::new(Vec::new()),
    });
    let clock = ManualClock::new(0);
    let tracker = Rc::new(ScreenTracker::with_clock(listener.clone(), clock.clone()));
    *listener.tracker.borrow_mut() = Some(tracker.clone());

    tracker.on_screen_created("splash");
    clock.advance(70);
    tracker.on_screen_view_is_ready("splash");

    assert_eq!(*listener.usable.borrow(), vec![70]);
    assert_eq!(tracker.pending_sessions(), 0);

    // Break the cycle.
    listener.tracker.borrow_mut().take();
}
