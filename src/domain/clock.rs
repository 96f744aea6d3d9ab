//! Time source abstraction for the daily event window.
//!
//! The engine only ever asks "what is the current unix timestamp", so the
//! clock is a single-method trait. Production wiring uses [`SystemClock`];
//! tests drive [`ManualClock`] forward explicitly to cross day boundaries.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the current unix time in whole seconds.
pub trait Clock: Debug + Send + Sync {
    /// Returns seconds since the unix epoch.
    fn now_unix(&self) -> u64;
}

/// Wall-clock time via [`chrono::Utc`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_unix(&self) -> u64 {
        let now = chrono::Utc::now().timestamp();
        u64::try_from(now).unwrap_or(0)
    }
}

/// Manually advanced clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    /// Creates a clock frozen at `now` seconds since the epoch.
    #[must_use]
    pub fn new(now: u64) -> Self {
        Self {
            now: AtomicU64::new(now),
        }
    }

    /// Advances the clock by `seconds`.
    pub fn advance(&self, seconds: u64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }

    /// Sets the clock to an absolute timestamp.
    pub fn set(&self, now: u64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(100);
        assert_eq!(clock.now_unix(), 100);
        clock.advance(50);
        assert_eq!(clock.now_unix(), 150);
        clock.set(10);
        assert_eq!(clock.now_unix(), 10);
    }

    #[test]
    fn system_clock_is_past_2020() {
        let clock = SystemClock;
        assert!(clock.now_unix() > 1_577_836_800);
    }
}
