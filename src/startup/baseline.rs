use crate::clock::Millis;
use crate::config::StartupOptions;

/// Picks the instant cold start is measured from.
///
/// The process start time is used unless app creation happened implausibly
/// long after it, which means the OS handed us a recycled process; then the
/// earliest instant recorded by our own initialization (`fallback`) is used.
pub fn select_baseline(
    on_create: Millis,
    process_start: Millis,
    fallback: Millis,
    options: &StartupOptions,
) -> Millis {
    if on_create - process_start > options.max_plausible_gap_ms {
        fallback
    } else {
        process_start
    }
}

/// Cold start duration: from the selected baseline to the first render.
pub fn compute_startup_time(
    first_render: Millis,
    on_create: Millis,
    process_start: Millis,
    fallback: Millis,
    options: &StartupOptions,
) -> Millis {
    first_render - select_baseline(on_create, process_start, fallback, options)
}
