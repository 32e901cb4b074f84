use crate::clock::Millis;
use crate::error::ConfigError;

/// Latency thresholds used to classify frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameThresholds {
    /// Frames slower than this miss a 60fps deadline.
    pub slow_ms: Millis,
    /// Frames slower than this are a perceptible freeze.
    pub frozen_ms: Millis,
    /// Durations at or above this are measurement artifacts and are discarded.
    /// Anything that long is an ANR rather than a frame.
    pub max_valid_ms: Millis,
}

impl FrameThresholds {
    pub const SLOW_MS: Millis = 16;
    pub const FROZEN_MS: Millis = 700;
    pub const MAX_VALID_MS: Millis = 5_000;

    #[inline(always)]
    pub fn is_valid(&self, duration_ms: Millis) -> bool {
        (0..self.max_valid_ms).contains(&duration_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.slow_ms <= 0 {
            return Err(ConfigError::NonPositiveSlowThreshold(self.slow_ms));
        }
        if self.frozen_ms <= self.slow_ms {
            return Err(ConfigError::FrozenNotAboveSlow {
                slow: self.slow_ms,
                frozen: self.frozen_ms,
            });
        }
        if self.max_valid_ms <= self.frozen_ms {
            return Err(ConfigError::MaxValidNotAboveFrozen {
                frozen: self.frozen_ms,
                max_valid: self.max_valid_ms,
            });
        }
        Ok(())
    }
}

impl Default for FrameThresholds {
    fn default() -> Self {
        Self {
            slow_ms: Self::SLOW_MS,
            frozen_ms: Self::FROZEN_MS,
            max_valid_ms: Self::MAX_VALID_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupOptions {
    /// Longest believable time between process start and app creation. A larger
    /// gap means the OS reused a process and its start time is meaningless.
    pub max_plausible_gap_ms: Millis,
}

impl StartupOptions {
    pub const MAX_PLAUSIBLE_GAP_MS: Millis = 60_000;

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_plausible_gap_ms <= 0 {
            return Err(ConfigError::NonPositiveStartupGap(self.max_plausible_gap_ms));
        }
        Ok(())
    }
}

impl Default for StartupOptions {
    fn default() -> Self {
        Self {
            max_plausible_gap_ms: Self::MAX_PLAUSIBLE_GAP_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerfConfig {
    pub frames: FrameThresholds,
    pub startup: StartupOptions,
}

impl PerfConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.frames.validate()?;
        self.startup.validate()
    }
}
