use clap::Parser;
use spdlog::prelude::*;

use perf_suite::measure::PerfLogger;
use perf_suite::rendering::HistogramAggregator;
use perf_suite::sim::{MainQueue, SimHost};
use perf_suite::startup::StaticProcessInfo;
use perf_suite::tti::TtfrHelper;
use perf_suite::{
    Clock, ColdStartRecord, FrameMetricsTracker, FrameThresholds, ManualClock, Millis, PerfConfig,
    ScreenTracker, StartupTimeTracker, SurfaceScreenTracker,
};
use std::rc::Rc;

/// Replays one launch of a single-screen app and prints what was measured.
#[derive(Parser)]
struct Args {
    /// Time from the first frame until the screen shows meaningful content.
    #[arg(long, default_value_t = 400)]
    usable_delay_ms: Millis,
    /// Durations of the frames rendered while the screen is in the foreground.
    #[arg(long, value_delimiter = ',', default_values_t = [8, 12, 16, 24, 48, 120, 750, 9])]
    frames: Vec<Millis>,
    /// Time between process start and app creation.
    #[arg(long, default_value_t = 180)]
    launch_gap_ms: Millis,
    #[arg(long, default_value_t = FrameThresholds::SLOW_MS)]
    slow_ms: Millis,
    /// The first screen is rebuilt from saved state.
    #[arg(long)]
    restored: bool,
    /// The process was started for a background component.
    #[arg(long)]
    background: bool,
}

struct Screen {
    name: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = PerfConfig {
        frames: FrameThresholds {
            slow_ms: args.slow_ms,
            ..Default::default()
        },
        ..Default::default()
    };
    config.validate()?;

    // The process starts at uptime 0.
    let clock = ManualClock::new(0);
    let process = StaticProcessInfo {
        foreground: !args.background,
        start_uptime_millis: clock.now_millis(),
    };
    clock.advance(args.launch_gap_ms / 2);
    ColdStartRecord::global().mark_now(&clock);
    clock.advance(args.launch_gap_ms - args.launch_gap_ms / 2);

    info!("[App] created at {}ms", clock.now_millis());
    let logger = Rc::new(PerfLogger::new());
    let startup = StartupTimeTracker::register(
        &process,
        ColdStartRecord::global(),
        logger.clone(),
        clock.clone(),
        config.startup,
    );
    if startup.is_none() {
        info!("[App] startup time is not tracked for this launch");
    }

    let screens =
        SurfaceScreenTracker::new(ScreenTracker::with_clock(logger.clone(), clock.clone()));
    let helper = TtfrHelper::<Screen, _, _, _>::new(screens.clone(), |screen: &Screen| {
        Some(screen.name.to_owned())
    });
    let mut frames =
        FrameMetricsTracker::with_clock(HistogramAggregator::new(), logger.clone(), clock.clone())
            .with_thresholds(config.frames)?;

    let queue = MainQueue::new();
    let host = SimHost::new(&queue);
    let screen = Screen { name: "home" };

    helper.on_screen_pre_created(&screen);
    if let Some(startup) = &startup {
        startup.on_screen_created(screen.name, &host, args.restored);
    }

    // Inflating the layout.
    clock.advance(120);
    host.set_content();
    let Some(surface) = host.sim_surface() else {
        return Err("content was set but no surface was created".into());
    };

    frames.on_screen_started(screen.name);
    helper.on_screen_started(&screen, Some(&surface));

    clock.advance(16);
    surface.render_pass();
    queue.run_pending();

    // Loading data.
    clock.advance(args.usable_delay_ms);
    screens.on_screen_is_usable(screen.name, &surface);
    clock.advance(16);
    surface.render_pass();
    queue.run_pending();

    for &duration in &args.frames {
        clock.advance(duration.max(0));
        frames.aggregator_mut().record_frame(screen.name, duration);
        surface.render_pass();
        queue.run_pending();
    }

    info!("[App] {} leaves the foreground", screen.name);
    if let Some(startup) = &startup {
        startup.on_screen_paused();
    }
    frames.on_screen_paused(screen.name);
    helper.on_screen_stopped(&screen);
    frames.on_screen_stopped(screen.name);

    info!("[App] {} render passes", surface.render_passes());
    println!("{}", logger.report());
    for (screen, metrics) in logger.rendering_reports() {
        println!("[frames/{}] {}", screen, metrics);
    }

    Ok(())
}
