//! The host clock abstraction a [`super::game_loop::GameLoop`] paces itself
//! against.
//!
//! Threading time through a trait rather than calling `std::time::Instant`
//! inline keeps the scheduler's paced-wait loop and catch-up arithmetic
//! testable without real sleeping — see [`FakeClock`].

use std::time::{Duration, Instant};

/// A monotonic tick source plus the one side effect the scheduler needs:
/// yielding the thread for a bit.
///
/// Ticks are in whatever unit the paired [`GameLoopConfig::clocks_per_second`](super::game_loop::GameLoopConfig::clocks_per_second)
/// names; [`SystemClock`] counts milliseconds, so it's meant to be paired
/// with `clocks_per_second = 1000`.
pub trait Clock {
    /// Current tick count. Must be monotonically non-decreasing.
    fn now_ticks(&mut self) -> u64;

    /// Yields the thread for approximately `ms` milliseconds.
    fn sleep(&mut self, ms: u64);
}

/// The default [`Clock`]: counts milliseconds elapsed since the clock was
/// created, via [`std::time::Instant`], and sleeps via
/// [`std::thread::sleep`]. Pair with `clocks_per_second = 1000`.
#[derive(Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    /// Creates a clock whose epoch is "now".
    pub fn new() -> Self {
        SystemClock {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now_ticks(&mut self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn sleep(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

/// A [`Clock`] for tests: ticks only ever advance when told to, and
/// `sleep` advances the clock by the requested number of milliseconds
/// instead of actually sleeping (so a paced-wait loop driven by a
/// `FakeClock` terminates deterministically). Pair with
/// `clocks_per_second = 1000` to keep "ticks" and "milliseconds" the same
/// unit, matching [`SystemClock`]'s convention.
#[cfg(any(test, feature = "test-util"))]
#[derive(Debug, Default)]
pub struct FakeClock {
    ticks: u64,
    /// Every `ms` value passed to `sleep`, in call order.
    pub sleep_log: Vec<u64>,
}

#[cfg(any(test, feature = "test-util"))]
impl FakeClock {
    /// A fake clock starting at tick 0.
    pub fn new() -> Self {
        FakeClock::default()
    }

    /// Advances the clock by `ticks` without going through `sleep`.
    pub fn advance(&mut self, ticks: u64) {
        self.ticks += ticks;
    }
}

#[cfg(any(test, feature = "test-util"))]
impl Clock for FakeClock {
    fn now_ticks(&mut self) -> u64 {
        self.ticks
    }

    fn sleep(&mut self, ms: u64) {
        self.sleep_log.push(ms);
        self.ticks += ms;
    }
}
