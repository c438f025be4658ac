//! [`Timings`](crate::Timings) configuration.
//!
//! This module contains the main [`TimingsConfig`]uration
//! struct, its builder, and [`OnMissing`], the policy for
//! reads and stops of keys that have nothing to give.

//---------------------------------------------------------------------------------------------------- Import
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::num::DEFAULT_DECIMALS;

//---------------------------------------------------------------------------------------------------- OnMissing
/// What to do when a key has no value to give.
///
/// This applies to:
/// - stopping a key with no running stopwatch
///   (never started, or already stopped)
/// - reading a key with no recorded result
///   (never started, or still running)
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Eq, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OnMissing {
    #[default]
    /// Quietly return `0`.
    ///
    /// # Default
    /// This is the default [`OnMissing`].
    /// ```rust
    /// use cuprate_timings::config::OnMissing;
    ///
    /// assert_eq!(OnMissing::default(), OnMissing::Silent);
    /// ```
    Silent,

    /// Return `0`, but emit a [`tracing::warn`] event naming the key.
    Warn,

    /// Return a [`TimingsError`](crate::TimingsError).
    Error,
}

//---------------------------------------------------------------------------------------------------- TimingsConfigBuilder
/// Builder for [`TimingsConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimingsConfigBuilder {
    /// [`TimingsConfig::decimals`].
    decimals: Option<u8>,

    /// [`TimingsConfig::on_missing`].
    on_missing: Option<OnMissing>,
}

impl TimingsConfigBuilder {
    /// Create a new [`TimingsConfigBuilder`].
    ///
    /// [`TimingsConfigBuilder::build`] can be called
    /// immediately after this function to use default values.
    pub const fn new() -> Self {
        Self {
            decimals: None,
            on_missing: None,
        }
    }

    /// Build into a [`TimingsConfig`].
    ///
    /// # Default values
    /// - [`TimingsConfig::decimals`] is left unset
    /// - [`OnMissing::default`] is used for [`TimingsConfig::on_missing`]
    pub fn build(self) -> TimingsConfig {
        TimingsConfig {
            decimals: self.decimals,
            on_missing: self.on_missing.unwrap_or_default(),
        }
    }

    /// Set the instance-wide rounding precision.
    #[must_use]
    pub const fn decimals(mut self, decimals: u8) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Set a custom [`OnMissing`] policy.
    #[must_use]
    pub const fn on_missing(mut self, on_missing: OnMissing) -> Self {
        self.on_missing = Some(on_missing);
        self
    }
}

//---------------------------------------------------------------------------------------------------- TimingsConfig
/// [`Timings`](crate::Timings) configuration.
///
/// For construction, use [`TimingsConfigBuilder`] or [`Default`].
///
/// ```rust
/// use cuprate_timings::config::*;
///
/// let config = TimingsConfigBuilder::new()
///     .decimals(3)
///     .on_missing(OnMissing::Warn)
///     .build();
///
/// assert_eq!(config.decimals, Some(3));
/// assert_eq!(config.stopwatch_decimals(), 3);
/// assert_eq!(config.on_missing, OnMissing::Warn);
///
/// let config = TimingsConfig::default();
/// assert_eq!(config.decimals, None);
/// assert_eq!(config.stopwatch_decimals(), 2);
/// assert_eq!(config.on_missing, OnMissing::Silent);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(deny_unknown_fields, default))]
pub struct TimingsConfig {
    /// Default rounding precision for every started stopwatch.
    ///
    /// If unset, stopwatches use [`DEFAULT_DECIMALS`].
    pub decimals: Option<u8>,

    /// What reads and stops of missing keys do.
    pub on_missing: OnMissing,
}

impl TimingsConfig {
    /// Create a new [`TimingsConfig`] with a rounding precision.
    ///
    /// All other values will be [`Default::default`].
    pub fn new(decimals: Option<u8>) -> Self {
        Self {
            decimals,
            ..Default::default()
        }
    }

    /// The precision stopwatches started without an explicit one use.
    pub fn stopwatch_decimals(&self) -> u8 {
        self.decimals.unwrap_or(DEFAULT_DECIMALS)
    }
}
