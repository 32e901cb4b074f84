use crate::surface::ListenerId;
use thiserror::Error;

/// Failures reported by platform-side surface and aggregator operations.
///
/// The core never propagates these to the host application: they are logged
/// and dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("draw notification channel is no longer alive")]
    NotAlive,
    #[error("draw listener {0} is not registered")]
    UnknownListener(ListenerId),
    #[error("platform refused the operation: {0}")]
    Refused(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("slow frame threshold must be positive, got {0}ms")]
    NonPositiveSlowThreshold(i64),
    #[error("frozen frame threshold ({frozen}ms) must be above the slow threshold ({slow}ms)")]
    FrozenNotAboveSlow { slow: i64, frozen: i64 },
    #[error("max valid frame duration ({max_valid}ms) must be above the frozen threshold ({frozen}ms)")]
    MaxValidNotAboveFrozen { frozen: i64, max_valid: i64 },
    #[error("max plausible startup gap must be positive, got {0}ms")]
    NonPositiveStartupGap(i64),
}

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("failed to create duration histogram: {0}")]
    Histogram(#[from] hdrhistogram::CreationError),
}
