use crate::clock::Millis;

/// What the platform knows about the running process.
pub trait ProcessInfo {
    /// True if the process currently has foreground importance. Processes
    /// started for a service or a broadcast do not.
    fn is_foreground(&self) -> bool;

    /// Instant at which the OS started the process, in the time base of the
    /// [`Clock`](crate::Clock) the startup tracker reads. With
    /// [`UptimeClock`](crate::UptimeClock), convert the platform's start
    /// instant through [`UptimeClock::millis_at`](crate::UptimeClock::millis_at).
    fn start_uptime_millis(&self) -> Millis;
}

/// Fixed answers, for tests and for platforms that report them once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticProcessInfo {
    pub foreground: bool,
    pub start_uptime_millis: Millis,
}

impl ProcessInfo for StaticProcessInfo {
    fn is_foreground(&self) -> bool {
        self.foreground
    }

    fn start_uptime_millis(&self) -> Millis {
        self.start_uptime_millis
    }
}
