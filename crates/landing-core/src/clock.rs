//! Host-advanced animation clock.

use web_time::Duration;

/// Deterministic monotonic clock controlled by the host.
///
/// Browser hosts set it from the `requestAnimationFrame` timestamp; tests
/// set it by hand.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }
}

/// Convert a host timestamp in milliseconds to a [`Duration`].
///
/// Negative, NaN and infinite inputs clamp instead of panicking.
#[must_use]
pub fn millis_to_duration(ms: f64) -> Duration {
    if ms.is_nan() || ms <= 0.0 {
        return Duration::ZERO;
    }
    if ms >= u64::MAX as f64 {
        return Duration::MAX;
    }
    let whole = ms.trunc();
    let nanos = ((ms - whole) * 1_000_000.0).round() as u64;
    Duration::from_millis(whole as u64).saturating_add(Duration::from_nanos(nanos))
}
