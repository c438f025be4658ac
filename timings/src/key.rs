//! [`TimingsKey`], the name of a measurement.

//---------------------------------------------------------------------------------------------------- Use
use std::{fmt, num::TryFromIntError};

//---------------------------------------------------------------------------------------------------- TimingsKey
/// The name a [`Timings`](crate::Timings) entry is stored under.
///
/// Keys are either strings or integers. Integer keys that
/// need disambiguating turn into strings, see [`TimingsKey::with_suffix`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimingsKey {
    /// A named key, e.g. `"load"`.
    Str(String),
    /// A numbered key, e.g. a block height or request ID.
    ///
    /// Unsigned heights convert with [`TryFrom`], failing above [`i64::MAX`].
    Int(i64),
}

impl TimingsKey {
    /// Append `n` to this key, with no separator.
    ///
    /// The result is always a [`TimingsKey::Str`].
    ///
    /// ```rust
    /// # use cuprate_timings::TimingsKey;
    /// assert_eq!(TimingsKey::from("load").with_suffix(2), TimingsKey::from("load2"));
    /// assert_eq!(TimingsKey::from(5).with_suffix(2), TimingsKey::from("52"));
    /// ```
    #[must_use]
    pub fn with_suffix(&self, n: u64) -> Self {
        Self::Str(format!("{self}{n}"))
    }

    /// Returns the inner string, if this is a [`TimingsKey::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Int(_) => None,
        }
    }
}

impl fmt::Display for TimingsKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
        }
    }
}

impl From<&str> for TimingsKey {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for TimingsKey {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for TimingsKey {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<&Self> for TimingsKey {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}

macro_rules! impl_from_int {
    ($($int:ty),* $(,)?) => {
        $(
            impl From<$int> for TimingsKey {
                fn from(value: $int) -> Self {
                    Self::Int(i64::from(value))
                }
            }
        )*
    };
}
impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_try_from_int {
    ($($int:ty),* $(,)?) => {
        $(
            impl TryFrom<$int> for TimingsKey {
                type Error = TryFromIntError;

                fn try_from(value: $int) -> Result<Self, Self::Error> {
                    Ok(Self::Int(i64::try_from(value)?))
                }
            }
        )*
    };
}
impl_try_from_int!(u64, usize);
