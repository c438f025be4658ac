#![doc = include_str!("../README.md")]

//---------------------------------------------------------------------------------------------------- Public API
pub mod clock;
pub mod config;
pub mod num;

mod error;
mod key;
mod stopwatch;
mod timings;

pub use error::TimingsError;
pub use key::TimingsKey;
pub use stopwatch::Stopwatch;
pub use timings::{Stopper, Timings};

//----------------------------------------------------------------------------------------------------
