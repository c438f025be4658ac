//! Monotonic clock sources.
//!
//! [`Stopwatch`](crate::Stopwatch)es and [`Timings`](crate::Timings)
//! never read the system clock directly, they are handed a [`Clock`].
//!
//! - [`MonotonicClock`] is the real clock, backed by [`Instant`]
//! - [`ManualClock`] only moves when told to, for deterministic tests

//---------------------------------------------------------------------------------------------------- Use
use std::{
    cell::Cell,
    rc::Rc,
    time::{Duration, Instant},
};

//---------------------------------------------------------------------------------------------------- Clock
/// A monotonic time source.
///
/// [`Clock::now`] returns the time passed since some
/// arbitrary origin chosen by the implementation.
///
/// The only hard requirement is that readings never go
/// backwards; only the difference between two readings
/// of the _same_ clock is meaningful.
pub trait Clock: Clone {
    /// Read the clock.
    fn now(&self) -> Duration;
}

/// Convert a [`Duration`] into floating point milliseconds.
///
/// ```rust
/// # use cuprate_timings::clock::*;
/// # use std::time::Duration;
/// assert_eq!(duration_to_ms(Duration::from_secs(1)), 1000.0);
/// assert_eq!(duration_to_ms(Duration::from_micros(1500)), 1.5);
/// assert_eq!(duration_to_ms(Duration::ZERO), 0.0);
/// ```
#[inline]
#[expect(
    clippy::cast_precision_loss,
    reason = "exact below 2^53 nanoseconds, about 104 days"
)]
pub fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

//---------------------------------------------------------------------------------------------------- MonotonicClock
/// The real clock.
///
/// The origin is the moment this clock was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a new clock with an origin of [`Instant::now`].
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

//---------------------------------------------------------------------------------------------------- ManualClock
/// A clock that only moves when told to.
///
/// Clones share the same reading, so advancing any
/// copy advances all of them, including the copies held
/// by [`Stopwatch`](crate::Stopwatch)es.
///
/// ```rust
/// # use cuprate_timings::clock::*;
/// # use std::time::Duration;
/// let clock = ManualClock::new();
/// let copy = clock.clone();
///
/// clock.advance_ms(10.5);
/// assert_eq!(duration_to_ms(copy.now()), 10.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Create a clock reading [`Duration::ZERO`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock that starts at `now`.
    pub fn starting_at(now: Duration) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Move the clock forwards by `by`.
    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }

    /// Move the clock forwards by `ms` milliseconds.
    ///
    /// Negative, `NaN` or otherwise unrepresentable values are ignored,
    /// the clock must never go backwards.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "checked finite and non-negative, float to int casts saturate"
    )]
    pub fn advance_ms(&self, ms: f64) {
        if !ms.is_finite() || ms < 0.0 {
            return;
        }

        let nanos = (ms * 1_000_000.0).round() as u64;
        self.advance(Duration::from_nanos(nanos));
    }

    /// Set the clock to `now`.
    ///
    /// This is only checked in debug builds, but
    /// `now` should not be earlier than the current reading.
    pub fn set(&self, now: Duration) {
        debug_assert!(now >= self.now.get(), "ManualClock went backwards");
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    #[inline]
    fn now(&self) -> Duration {
        self.now.get()
    }
}
