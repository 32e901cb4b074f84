use perf_suite::sim::{MainQueue, SimHost};
use perf_suite::startup::{StartInstantSource, StaticProcessInfo};
use perf_suite::{
    ColdStartRecord, ManualClock, Millis, StartupListener, StartupOptions, StartupTimeTracker,
    SurfaceHost,
};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Reports {
    startups: RefCell<Vec<(Millis, String, bool)>>,
}

impl Reports {
    fn all(&self) -> Vec<(Millis, String, bool)> {
        self.startups.borrow().clone()
    }
}

impl StartupListener for Reports {
    fn on_cold_startup_time_is_ready(
        &self,
        duration_ms: Millis,
        first_screen: &str,
        is_actual_cold_start: bool,
    ) {
        self.startups
            .borrow_mut()
            .push((duration_ms, first_screen.to_owned(), is_actual_cold_start));
    }
}

fn foreground(start_uptime_millis: Millis) -> StaticProcessInfo {
    StaticProcessInfo {
        foreground: true,
        start_uptime_millis,
    }
}

fn register(
    process: &StaticProcessInfo,
    record: &ColdStartRecord,
    clock: &ManualClock,
) -> Option<(Rc<Reports>, StartupTimeTracker<Rc<Reports>, ManualClock>)> {
    let reports = Rc::new(Reports::default());
    StartupTimeTracker::register(
        process,
        record,
        reports.clone(),
        clock.clone(),
        StartupOptions::default(),
    )
    .map(|tracker| (reports, tracker))
}

/// Sets the host's content and delivers one render pass.
fn show(host: &SimHost, queue: &MainQueue) {
    host.set_content();
    if let Some(surface) = host.sim_surface() {
        surface.render_pass();
    }
    queue.run_pending();
}

#[test]
fn test_cold_start_from_process_start() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(200), &record, &clock).unwrap();
    assert_eq!(tracker.app_start(), 200);

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    tracker.on_screen_created("home", &host, false);
    clock.advance(300);
    show(&host, &queue);

    assert_eq!(reports.all(), vec![(1_100, "home".to_owned(), true)]);
    assert!(tracker.is_finished());
}

#[test]
fn test_restored_screen_is_not_actual_cold_start() {
    let clock = ManualClock::new(500);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(0), &record, &clock).unwrap();

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    tracker.on_screen_created("editor", &host, true);
    clock.advance(250);
    show(&host, &queue);

    assert_eq!(reports.all(), vec![(750, "editor".to_owned(), false)]);
}

#[test]
fn test_background_start_is_skipped() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let process = StaticProcessInfo {
        foreground: false,
        start_uptime_millis: 0,
    };

    assert!(register(&process, &record, &clock).is_none());
    // The skipped attempt does not use up the process claim.
    assert!(record.try_claim_report());
}

#[test]
fn test_second_registration_is_rejected() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();

    assert!(register(&foreground(0), &record, &clock).is_some());
    assert!(register(&foreground(0), &record, &clock).is_none());
}

#[test]
fn test_pause_before_first_frame_cancels() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(0), &record, &clock).unwrap();

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    tracker.on_screen_created("login", &host, false);
    tracker.on_screen_paused();
    assert!(tracker.is_finished());

    clock.advance(100);
    show(&host, &queue);
    assert!(reports.all().is_empty());
}

#[test]
fn test_pause_after_report_changes_nothing() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(0), &record, &clock).unwrap();

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    tracker.on_screen_created("home", &host, false);
    show(&host, &queue);
    tracker.on_screen_paused();

    assert_eq!(reports.all().len(), 1);
}

#[test]
fn test_reported_once_per_process() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(0), &record, &clock).unwrap();

    let queue = MainQueue::new();
    let first = SimHost::new(&queue);
    let second = SimHost::new(&queue);
    tracker.on_screen_created("splash", &first, false);
    tracker.on_screen_created("home", &second, false);

    clock.advance(40);
    show(&first, &queue);
    clock.advance(40);
    show(&second, &queue);
    show(&first, &queue);

    assert_eq!(reports.all(), vec![(1_040, "splash".to_owned(), true)]);

    // Screens created after the report do not wait for anything.
    let third = SimHost::new(&queue);
    tracker.on_screen_created("settings", &third, false);
    assert!(third.callback().is_none());
}

#[test]
fn test_recycled_process_uses_recorded_instant() {
    let clock = ManualClock::new(100_000);
    let record = ColdStartRecord::new();
    assert!(record.mark(99_600));
    let (reports, tracker) = register(&foreground(10_000), &record, &clock).unwrap();
    assert_eq!(tracker.app_start(), 99_600);

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    tracker.on_screen_created("home", &host, false);
    clock.advance(900);
    show(&host, &queue);

    assert_eq!(reports.all(), vec![(1_300, "home".to_owned(), true)]);
}

#[test]
fn test_recycled_process_without_record_uses_creation() {
    let clock = ManualClock::new(200_000);
    let record = ColdStartRecord::new();
    let (_reports, tracker) = register(&foreground(1_000), &record, &clock).unwrap();

    assert_eq!(tracker.app_start(), 200_000);
}

#[test]
fn test_surface_already_present() {
    let clock = ManualClock::new(1_000);
    let record = ColdStartRecord::new();
    let (reports, tracker) = register(&foreground(600), &record, &clock).unwrap();

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    host.set_content();
    tracker.on_screen_created("home", &host, false);
    assert!(host.callback().is_none());

    clock.advance(150);
    if let Some(surface) = host.sim_surface() {
        surface.render_pass();
    }
    queue.run_pending();

    assert_eq!(reports.all(), vec![(550, "home".to_owned(), true)]);
}
