//! [`Stopwatch`], a single elapsed time measurement.

//---------------------------------------------------------------------------------------------------- Use
use std::time::Duration;

use crate::{
    clock::{duration_to_ms, Clock, MonotonicClock},
    num::{round, DEFAULT_DECIMALS},
};

//---------------------------------------------------------------------------------------------------- Stopwatch
/// Tracks elapsed time in milliseconds.
///
/// The stopwatch starts running on creation.
///
/// ```rust
/// # use cuprate_timings::{Stopwatch, clock::ManualClock};
/// let clock = ManualClock::new();
/// let mut stopwatch = Stopwatch::with_clock(clock.clone(), 1);
///
/// clock.advance_ms(12.34);
/// assert_eq!(stopwatch.elapsed(), 12.3);
///
/// // Measure and restart.
/// assert_eq!(stopwatch.lap(), 12.3);
/// clock.advance_ms(1.0);
/// assert_eq!(stopwatch.elapsed(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Stopwatch<C: Clock = MonotonicClock> {
    /// Where readings come from.
    clock: C,
    /// The reading of `clock` at creation or the last reset.
    start_time: Duration,
    /// Fractional digits measurements are rounded to.
    decimals: u8,
}

impl Stopwatch {
    /// Start a new stopwatch on a [`MonotonicClock`],
    /// rounding to [`DEFAULT_DECIMALS`].
    pub fn new() -> Self {
        Self::with_decimals(DEFAULT_DECIMALS)
    }

    /// Start a new stopwatch on a [`MonotonicClock`],
    /// rounding to `decimals`.
    pub fn with_decimals(decimals: u8) -> Self {
        Self::with_clock(MonotonicClock::new(), decimals)
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Stopwatch<C> {
    /// Start a new stopwatch reading from `clock`.
    pub fn with_clock(clock: C, decimals: u8) -> Self {
        let start_time = clock.now();
        Self {
            clock,
            start_time,
            decimals,
        }
    }

    /// Returns the milliseconds passed since creation
    /// or since the last reset, rounded to [`Stopwatch::decimals`].
    ///
    /// If `reset` is `true` the stopwatch is restarted from
    /// the same reading the returned value was measured with.
    pub fn measure(&mut self, reset: bool) -> f64 {
        let end = self.clock.now();
        let elapsed = self.reading(end);

        if reset {
            self.start_time = end;
        }

        elapsed
    }

    /// [`Stopwatch::measure`] without resetting.
    pub fn elapsed(&self) -> f64 {
        self.reading(self.clock.now())
    }

    /// [`Stopwatch::measure`] with a reset.
    pub fn lap(&mut self) -> f64 {
        self.measure(true)
    }

    /// The fractional digits measurements are rounded to.
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Rounded milliseconds between the start and `end`.
    fn reading(&self, end: Duration) -> f64 {
        round(
            duration_to_ms(end.saturating_sub(self.start_time)),
            self.decimals,
        )
    }
}

//---------------------------------------------------------------------------------------------------- Tests
#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::clock::ManualClock;

    #[test]
    fn defaults() {
        let stopwatch = Stopwatch::new();
        assert_eq!(stopwatch.decimals(), DEFAULT_DECIMALS);
        assert!(stopwatch.elapsed() >= 0.0);
    }

    #[test]
    fn rounds_to_decimals() {
        let clock = ManualClock::new();
        let whole = Stopwatch::with_clock(clock.clone(), 0);
        let two = Stopwatch::with_clock(clock.clone(), 2);

        clock.advance_ms(3.456);
        assert_eq!(whole.elapsed(), 3.0);
        assert_eq!(two.elapsed(), 3.46);
    }

    #[test]
    fn reset_moves_baseline() {
        let clock = ManualClock::new();
        let mut stopwatch = Stopwatch::with_clock(clock.clone(), 2);

        clock.advance_ms(5.0);
        assert_eq!(stopwatch.measure(false), 5.0);
        assert_eq!(stopwatch.measure(true), 5.0);
        assert_eq!(stopwatch.measure(false), 0.0);

        clock.advance_ms(2.5);
        assert_eq!(stopwatch.measure(false), 2.5);
    }

    #[test]
    fn elapsed_matches_measure() {
        let clock = ManualClock::new();
        let mut stopwatch = Stopwatch::with_clock(clock.clone(), 1);

        clock.advance_ms(7.26);
        assert_eq!(stopwatch.elapsed(), 7.3);
        assert_eq!(stopwatch.measure(false), stopwatch.elapsed());
    }

    #[test]
    fn starts_at_creation_not_clock_origin() {
        let clock = ManualClock::new();
        clock.advance_ms(100.0);

        let stopwatch = Stopwatch::with_clock(clock.clone(), 2);
        clock.advance_ms(1.0);
        assert_eq!(stopwatch.elapsed(), 1.0);
    }

    proptest! {
        #[test]
        fn non_decreasing_without_reset(steps in proptest::collection::vec(0_u64..10_000, 1..32)) {
            let clock = ManualClock::new();
            let mut stopwatch = Stopwatch::with_clock(clock.clone(), 2);
            let mut last = 0.0;

            for step in steps {
                clock.advance(Duration::from_micros(step));
                let now = stopwatch.measure(false);
                prop_assert!(now >= last);
                last = now;
            }
        }

        #[test]
        fn measures_delta(micros in 0_u64..100_000_000, decimals in 0_u8..4) {
            let clock = ManualClock::new();
            let stopwatch = Stopwatch::with_clock(clock.clone(), decimals);

            let delta = Duration::from_micros(micros);
            clock.advance(delta);
            prop_assert_eq!(stopwatch.elapsed(), round(duration_to_ms(delta), decimals));
        }
    }
}
