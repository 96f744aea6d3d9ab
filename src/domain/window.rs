//! Rolling 24-hour event window.
//!
//! Successful swaps and supplications share one counter. The window is
//! anchored to calendar days in unix time: day index `floor(now / 86400)`.
//! Crossing into a new day index resets the counter to zero; nothing
//! decays mid-day.

/// Seconds per window (one unix day).
pub const WINDOW_SECONDS: u64 = 86_400;

/// Counter for the current unix-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyWindow {
    /// Unix day index the counter belongs to.
    pub day_index: u64,
    /// Successful events counted in that day.
    pub count: u64,
}

impl DailyWindow {
    /// Creates a window anchored at `now`.
    #[must_use]
    pub const fn new(now: u64) -> Self {
        Self {
            day_index: now / WINDOW_SECONDS,
            count: 0,
        }
    }

    /// Rolls the window forward to `now` if a day boundary was crossed.
    ///
    /// Returns `true` when the window rolled (and the counter reset).
    pub const fn roll(&mut self, now: u64) -> bool {
        let day = now / WINDOW_SECONDS;
        if day != self.day_index {
            self.day_index = day;
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Whether the counter has reached `cap`.
    #[must_use]
    pub const fn at_cap(&self, cap: u64) -> bool {
        self.count >= cap
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn same_day_does_not_roll() {
        let mut window = DailyWindow::new(1_000);
        window.count = 3;
        assert!(!window.roll(WINDOW_SECONDS - 1));
        assert_eq!(window.count, 3);
    }

    #[test]
    fn next_day_rolls_and_resets() {
        let mut window = DailyWindow::new(1_000);
        window.count = 3;
        assert!(window.roll(WINDOW_SECONDS));
        assert_eq!(window.count, 0);
        assert_eq!(window.day_index, 1);
    }

    #[test]
    fn cap_check() {
        let mut window = DailyWindow::new(0);
        window.count = 5;
        assert!(window.at_cap(5));
        assert!(!window.at_cap(6));
    }
}
