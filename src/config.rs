//! # Shutdown configuration.
//!
//! [`ShutdownConfig`] carries the single tunable shared by the adapters:
//! how long an interrupt may wait for cooperative draining before escalating.
//!
//! ## Sentinel values
//! - `grace = 0s` → "wait indefinitely" for the HTTP adapter
//!   ([`ShutdownConfig::drain_deadline`] returns `None`);
//! - `grace = 0s` → clamped to [`DEFAULT_GRACE`] for the RPC adapter
//!   ([`ShutdownConfig::grace_or_default`]), since a dual-phase stop with a
//!   zero-length race window would force-stop immediately.

use std::time::Duration;

/// Grace period applied when none is configured.
pub const DEFAULT_GRACE: Duration = Duration::from_secs(5);

/// Per-adapter shutdown tuning.
///
/// Constructed once and handed to each adapter at build time; adapters never
/// mutate it after registration.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use rungroup::{ShutdownConfig, DEFAULT_GRACE};
///
/// assert_eq!(ShutdownConfig::default().grace, DEFAULT_GRACE);
///
/// let cfg = ShutdownConfig::with_grace(Duration::from_secs(30));
/// assert_eq!(cfg.grace, Duration::from_secs(30));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShutdownConfig {
    /// Maximum time to wait for graceful termination before escalating.
    pub grace: Duration,
}

impl ShutdownConfig {
    /// Creates a configuration with the given grace period.
    pub fn with_grace(grace: Duration) -> Self {
        Self { grace }
    }

    /// Returns the drain deadline as an `Option`.
    ///
    /// - `None` → no deadline, wait indefinitely for the drain to finish;
    /// - `Some(d)` → bound the drain by `d`.
    #[inline]
    pub fn drain_deadline(&self) -> Option<Duration> {
        if self.grace == Duration::ZERO {
            None
        } else {
            Some(self.grace)
        }
    }

    /// Returns the grace period, substituting [`DEFAULT_GRACE`] for zero.
    ///
    /// Used where an unbounded wait is not meaningful (the dual-phase stop
    /// race needs a finite timer).
    #[inline]
    pub fn grace_or_default(&self) -> Duration {
        if self.grace == Duration::ZERO {
            DEFAULT_GRACE
        } else {
            self.grace
        }
    }
}

impl Default for ShutdownConfig {
    /// Default configuration: `grace = 5s`.
    fn default() -> Self {
        Self {
            grace: DEFAULT_GRACE,
        }
    }
}
