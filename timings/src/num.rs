//! Number related

//---------------------------------------------------------------------------------------------------- Constants
/// The default amount of fractional digits a measurement is rounded to.
pub const DEFAULT_DECIMALS: u8 = 2;

//---------------------------------------------------------------------------------------------------- Free Functions
#[inline]
/// Round `value` to `decimals` fractional digits.
///
/// Halves round away from zero, which for the
/// non-negative values measured here is half-up.
///
/// `decimals` is not validated, very large
/// values simply leave `value` untouched.
///
/// ```rust
/// # use cuprate_timings::num::*;
/// assert_eq!(round(1.2345, 2), 1.23);
/// assert_eq!(round(1.235, 1),  1.2);
/// assert_eq!(round(2.5, 0),    3.0);
/// assert_eq!(round(0.125, 2),  0.13);
/// assert_eq!(round(7.0, 3),    7.0);
///
/// assert!(round(f64::NAN, 2).is_nan());
/// assert_eq!(round(f64::INFINITY, 2), f64::INFINITY);
/// ```
pub fn round(value: f64, decimals: u8) -> f64 {
    let factor = 10_f64.powi(i32::from(decimals));
    let scaled = value * factor;

    // At or past 2^52 every `f64` is already a whole number.
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }

    scaled.round() / factor
}
