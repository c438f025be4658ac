//! Timings error types.

//---------------------------------------------------------------------------------------------------- Import
use crate::TimingsKey;

//---------------------------------------------------------------------------------------------------- TimingsError
/// Errors returned by [`Timings`](crate::Timings).
///
/// These are only ever returned when the instance was configured with
/// [`OnMissing::Error`](crate::config::OnMissing::Error), with any
/// other setting a missing value reads as `0`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TimingsError {
    /// A stop was requested for a key with no running stopwatch.
    ///
    /// Either the key was never started, or it was already stopped.
    #[error("no running stopwatch for timing key `{key}`")]
    NotRunning {
        /// The key that was stopped.
        key: TimingsKey,
    },

    /// A result was read for a key that has none recorded.
    ///
    /// Either the key was never started, or it is still running.
    #[error("no recorded timing for key `{key}`")]
    NotRecorded {
        /// The key that was read.
        key: TimingsKey,
    },
}
