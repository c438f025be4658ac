//! [`Timings`], a named collection of measurements.

//---------------------------------------------------------------------------------------------------- Use
use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use indexmap::IndexMap;

use crate::{
    clock::{Clock, MonotonicClock},
    config::{OnMissing, TimingsConfig},
    error::TimingsError,
    key::TimingsKey,
    stopwatch::Stopwatch,
};

//---------------------------------------------------------------------------------------------------- Inner
/// State shared between a [`Timings`] and its [`Stopper`]s.
struct Inner<C: Clock> {
    config: TimingsConfig,

    /// Results in the order their keys were first started.
    ///
    /// `None` is a placeholder for a key that is still running.
    timings: IndexMap<TimingsKey, Option<f64>>,

    /// Currently running stopwatches.
    ///
    /// INVARIANT: every key here is also in `timings` with a `None` value.
    stopwatches: HashMap<TimingsKey, Stopwatch<C>>,

    /// Results merged into keys that were running at the time.
    ///
    /// These are added to the measurement when the key stops.
    /// INVARIANT: every key here is also in `stopwatches`.
    merged: HashMap<TimingsKey, f64>,
}

impl<C: Clock> Inner<C> {
    /// Resolve `key` into one without a running stopwatch.
    ///
    /// `key` is returned as is if it is free, otherwise
    /// `key2`, `key3`, ... are tried in order.
    fn next_key(&self, key: TimingsKey) -> TimingsKey {
        if !self.stopwatches.contains_key(&key) {
            return key;
        }

        let mut i = 2;
        loop {
            let next = key.with_suffix(i);
            if !self.stopwatches.contains_key(&next) {
                return next;
            }
            i += 1;
        }
    }

    /// Stop the stopwatch for `key` and record its result,
    /// plus anything merged into `key` while it was running.
    fn stop(&mut self, key: &TimingsKey) -> Result<f64, TimingsError> {
        let Some(mut stopwatch) = self.stopwatches.remove(key) else {
            return self.missing(TimingsError::NotRunning { key: key.clone() });
        };

        let elapsed = stopwatch.measure(false);
        let timing = self.merged.remove(key).unwrap_or_default() + elapsed;
        self.timings.insert(key.clone(), Some(timing));
        tracing::trace!(%key, elapsed, timing, "stopped timer");

        Ok(timing)
    }

    /// Apply [`TimingsConfig::on_missing`] to `error`.
    fn missing(&self, error: TimingsError) -> Result<f64, TimingsError> {
        match self.config.on_missing {
            OnMissing::Silent => Ok(0.0),
            OnMissing::Warn => {
                tracing::warn!("{error}, using 0");
                Ok(0.0)
            }
            OnMissing::Error => Err(error),
        }
    }
}

//---------------------------------------------------------------------------------------------------- Timings
/// A named collection of [`Stopwatch`] results.
///
/// Each [`Timings::start`] call starts a stopwatch under a key
/// and returns a [`Stopper`] that records its result when called.
///
/// If a key is started while a stopwatch with the same key is
/// still running, the new one is stored under a suffixed key
/// instead: `key2`, `key3`, and so on. Keys that were already
/// stopped are free to be started again.
///
/// ```rust
/// # use cuprate_timings::{Timings, clock::ManualClock, config::TimingsConfig};
/// let clock = ManualClock::new();
/// let mut timings = Timings::with_clock(clock.clone(), TimingsConfig::new(Some(2)));
///
/// let load = timings.start("load");
/// clock.advance_ms(1.5);
/// let load2 = timings.start("load");
/// clock.advance_ms(1.0);
///
/// assert_eq!(load2.key().to_string(), "load2");
/// assert_eq!(load2.stop().unwrap(), 1.0);
/// assert_eq!(load.stop().unwrap(), 2.5);
///
/// let all: Vec<_> = timings.get_all().map(|(k, v)| (k.to_string(), v)).collect();
/// assert_eq!(all, [("load".to_string(), 2.5), ("load2".to_string(), 1.0)]);
/// ```
///
/// # Threads
/// [`Timings`] and its [`Stopper`]s share state without locking,
/// they are neither [`Send`] nor [`Sync`]. Measure each thread
/// separately and [`Timings::merge`] the results.
pub struct Timings<C: Clock = MonotonicClock> {
    /// Clock every stopwatch is created from.
    clock: C,
    inner: Rc<RefCell<Inner<C>>>,
}

impl Timings {
    /// Create an empty [`Timings`] with the default [`TimingsConfig`].
    pub fn new() -> Self {
        Self::with_config(TimingsConfig::default())
    }

    /// Create an empty [`Timings`] whose stopwatches round to `decimals`.
    pub fn with_decimals(decimals: u8) -> Self {
        Self::with_config(TimingsConfig::new(Some(decimals)))
    }

    /// Create an empty [`Timings`] from a [`TimingsConfig`].
    pub fn with_config(config: TimingsConfig) -> Self {
        Self::with_clock(MonotonicClock::new(), config)
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Timings<C> {
    /// Create an empty [`Timings`] reading time from `clock`.
    pub fn with_clock(clock: C, config: TimingsConfig) -> Self {
        Self {
            clock,
            inner: Rc::new(RefCell::new(Inner {
                config,
                timings: IndexMap::new(),
                stopwatches: HashMap::new(),
                merged: HashMap::new(),
            })),
        }
    }

    /// Start a stopwatch under `key`, rounding to the instance precision.
    ///
    /// The returned [`Stopper`] knows the resolved key,
    /// which differs from `key` if it was already running.
    pub fn start(&mut self, key: impl Into<TimingsKey>) -> Stopper<C> {
        let decimals = self.inner.borrow().config.stopwatch_decimals();
        self.start_with_decimals(key, decimals)
    }

    /// [`Timings::start`] with a custom rounding precision for this stopwatch.
    pub fn start_with_decimals(
        &mut self,
        key: impl Into<TimingsKey>,
        decimals: u8,
    ) -> Stopper<C> {
        let key: TimingsKey = key.into();
        let mut inner = self.inner.borrow_mut();

        let final_key = inner.next_key(key.clone());
        if final_key != key {
            tracing::trace!(%key, %final_key, "timing key already running");
        }

        inner.stopwatches.insert(
            final_key.clone(),
            Stopwatch::with_clock(self.clock.clone(), decimals),
        );
        // Reserve the slot now so iteration follows start order.
        inner.timings.insert(final_key.clone(), None);
        tracing::trace!(key = %final_key, decimals, "started timer");

        Stopper {
            key: final_key,
            inner: Rc::clone(&self.inner),
        }
    }

    /// Returns the recorded result for `key`.
    ///
    /// Keys that were never started or are still running have
    /// no result, these follow [`TimingsConfig::on_missing`].
    ///
    /// # Errors
    /// [`TimingsError::NotRecorded`] is returned for
    /// such keys if the policy is [`OnMissing::Error`].
    pub fn get(&self, key: impl Into<TimingsKey>) -> Result<f64, TimingsError> {
        let key: TimingsKey = key.into();
        let inner = self.inner.borrow();

        match inner.timings.get(&key) {
            Some(Some(timing)) => Ok(*timing),
            Some(None) | None => inner.missing(TimingsError::NotRecorded { key }),
        }
    }

    /// Returns the recorded result for `key`, [`None`] if there is none.
    ///
    /// Unlike [`Timings::get`] this separates "nothing recorded" from a
    /// measured `0` and never consults [`TimingsConfig::on_missing`].
    pub fn get_opt(&self, key: impl Into<TimingsKey>) -> Option<f64> {
        let key: TimingsKey = key.into();
        self.inner.borrow().timings.get(&key).copied().flatten()
    }

    /// Iterate over every `(key, result)` pair, in the
    /// order the keys were first passed to [`Timings::start`].
    ///
    /// Keys that are still running are included with a result of `0`.
    ///
    /// The iterator is a snapshot taken at call time,
    /// calling this again starts from the beginning.
    pub fn get_all(&self) -> impl Iterator<Item = (TimingsKey, f64)> {
        self.inner
            .borrow()
            .timings
            .iter()
            .map(|(key, timing)| (key.clone(), timing.unwrap_or_default()))
            .collect::<Vec<_>>()
            .into_iter()
    }

    /// Add `other`'s recorded results into this instance.
    ///
    /// Results under the same key are summed, keys missing on
    /// either side count as `0`. Keys still running in `other`
    /// are skipped, as are its running stopwatches.
    ///
    /// Results for keys still running in this instance are held
    /// back and added to the measurement once the key stops,
    /// until then the key reads as having no result.
    pub fn merge<O: Clock>(&mut self, other: &Timings<O>) {
        let other = other.inner.borrow();
        let mut inner = self.inner.borrow_mut();

        let mut merged = 0_usize;
        for (key, timing) in &other.timings {
            let Some(timing) = *timing else {
                continue;
            };

            if inner.stopwatches.contains_key(key) {
                *inner.merged.entry(key.clone()).or_default() += timing;
            } else {
                let entry = inner.timings.entry(key.clone()).or_insert(None);
                *entry = Some(entry.unwrap_or_default() + timing);
            }
            merged += 1;
        }

        tracing::debug!(merged, total = inner.timings.len(), "merged timings");
    }

    /// Returns `true` if `key` has a running stopwatch.
    pub fn is_running(&self, key: impl Into<TimingsKey>) -> bool {
        let key: TimingsKey = key.into();
        self.inner.borrow().stopwatches.contains_key(&key)
    }

    /// The amount of running stopwatches.
    pub fn running(&self) -> usize {
        self.inner.borrow().stopwatches.len()
    }

    /// The amount of keys, running or not.
    pub fn len(&self) -> usize {
        self.inner.borrow().timings.len()
    }

    /// Returns `true` if nothing was ever started or merged.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().timings.is_empty()
    }

    /// The instance-wide rounding precision, if any.
    pub fn decimals(&self) -> Option<u8> {
        self.inner.borrow().config.decimals
    }

    /// This instance's [`TimingsConfig`].
    pub fn config(&self) -> TimingsConfig {
        self.inner.borrow().config
    }

    /// Emit an [`tracing::info`] event for every entry, in [`Timings::get_all`] order.
    pub fn log(&self) {
        for (key, ms) in self.get_all() {
            tracing::info!(%key, ms, "timing");
        }
    }
}

impl<C: Clock> fmt::Debug for Timings<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Timings")
            .field("config", &inner.config)
            .field("timings", &inner.timings)
            .field("running", &inner.stopwatches.len())
            .finish_non_exhaustive()
    }
}

impl<C: Clock> fmt::Display for Timings<C> {
    /// One `key: result ms` line per entry.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, ms) in self.get_all() {
            writeln!(f, "{key}: {ms}ms")?;
        }
        Ok(())
    }
}

//---------------------------------------------------------------------------------------------------- Stopper
/// Stops one stopwatch started by [`Timings::start`].
///
/// Only the first [`Stopper::stop`] records a result, later calls find no
/// running stopwatch and follow [`TimingsConfig::on_missing`].
///
/// Dropping a [`Stopper`] does not stop its stopwatch,
/// the key stays running with no recorded result.
#[must_use = "a dropped `Stopper` can never record its timing"]
pub struct Stopper<C: Clock = MonotonicClock> {
    /// The resolved key.
    key: TimingsKey,
    inner: Rc<RefCell<Inner<C>>>,
}

impl<C: Clock> Stopper<C> {
    /// The key this stopwatch records under.
    ///
    /// This is the resolved key, e.g. `load2` for a second `load`.
    pub const fn key(&self) -> &TimingsKey {
        &self.key
    }

    /// Stop the stopwatch and record its result.
    ///
    /// The returned value is the one recorded, which includes
    /// results [`Timings::merge`]d into the key while it ran.
    ///
    /// # Errors
    /// [`TimingsError::NotRunning`] is returned when called again after
    /// the first stop if the policy is [`OnMissing::Error`].
    pub fn stop(&self) -> Result<f64, TimingsError> {
        self.inner.borrow_mut().stop(&self.key)
    }
}

impl<C: Clock> fmt::Debug for Stopper<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stopper")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
