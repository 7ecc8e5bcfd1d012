//! Time source for the timed warning.
//!
//! The engine never reads the system time directly. Sessions are generic
//! over a [`Clock`], so native and WASM hosts use [`SystemClock`] while
//! tests and scripted replays drive a [`ManualClock`].

use std::cell::Cell;
use std::fmt::Debug;
use std::time::Duration;

/// A monotonic time source.
pub trait Clock {
    /// Opaque point in time produced by [`now`](Self::now).
    type Instant: Copy + Debug;

    /// Current instant.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// [`Clock`] backed by the platform clock.
///
/// Uses `web_time::Instant`, which is `std::time::Instant` on native
/// targets and `performance.now()` in the browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    type Instant = web_time::Instant;

    fn now(&self) -> web_time::Instant {
        web_time::Instant::now()
    }

    fn elapsed(&self, since: &web_time::Instant) -> Duration {
        since.elapsed()
    }
}

/// [`Clock`] that only moves when told to.
///
/// Instants are offsets from the clock's creation. Uses interior
/// mutability so it can be advanced through a shared reference while a
/// session owns it.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ninedots_engine::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::new();
/// let start = clock.now();
/// clock.advance(Duration::from_millis(1500));
/// assert_eq!(clock.elapsed(&start), Duration::from_millis(1500));
/// ```
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// A clock reading zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Jump to an absolute offset. Moving backwards is ignored.
    pub fn set(&self, at: Duration) {
        if at > self.now.get() {
            self.now.set(at);
        }
    }
}

impl Clock for ManualClock {
    type Instant = Duration;

    fn now(&self) -> Duration {
        self.now.get()
    }

    fn elapsed(&self, since: &Duration) -> Duration {
        self.now.get().saturating_sub(*since)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_starts_at_zero() {
        assert_eq!(ManualClock::new().now(), Duration::ZERO);
    }

    #[test]
    fn manual_clock_set_is_monotonic() {
        let clock = ManualClock::new();
        clock.set(Duration::from_millis(300));
        clock.set(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(300));
    }

    #[test]
    fn manual_clock_elapsed_from_future_instant_is_zero() {
        let clock = ManualClock::new();
        assert_eq!(clock.elapsed(&Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn system_clock_elapsed_is_non_negative() {
        let clock = SystemClock;
        let start = clock.now();
        assert!(clock.elapsed(&start) < Duration::from_secs(60));
    }
}
