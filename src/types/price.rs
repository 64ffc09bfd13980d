//! Fixed-point price utilities.
//!
//! ## Overview
//!
//! Prices are stored as u64 scaled by 10^8. Two prices that are
//! economically equal always produce the same integer, so they always
//! land in the same price level. Raw floating point is never used as a
//! level key.
//!
//! ## Scale Factor
//!
//! A scale factor of 10^8 (100,000,000) gives 8 decimal places.
//!
//! ## Examples
//!
//! ```
//! use lob_sim::types::price::{to_fixed, f64_to_fixed, from_fixed_trimmed};
//!
//! let price = to_fixed("98.5").unwrap();
//! assert_eq!(price, 9_850_000_000);
//! assert_eq!(f64_to_fixed(98.5), Some(price));
//! assert_eq!(from_fixed_trimmed(price), "98.5");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Scaling factor for fixed-point prices: 10^8
pub const SCALE: u64 = 100_000_000;

/// Largest whole-unit price that can be represented
///
/// u64::MAX / SCALE ≈ 184,467,440,737
pub const MAX_VALUE: u64 = u64::MAX / SCALE;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to fixed-point u64
///
/// Returns `None` if parsing fails or the value is negative or out of range.
///
/// ```
/// use lob_sim::types::price::to_fixed;
///
/// assert_eq!(to_fixed("1.0"), Some(100_000_000));
/// assert_eq!(to_fixed("0.00000001"), Some(1));
/// assert_eq!(to_fixed("-1"), None);
/// ```
pub fn to_fixed(s: &str) -> Option<u64> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_fixed(decimal)
}

/// Convert a Decimal to fixed-point u64
///
/// Values with more than 8 decimal places are rounded to the nearest tick.
pub fn decimal_to_fixed(d: Decimal) -> Option<u64> {
    if d.is_sign_negative() && !d.is_zero() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(SCALE))?;
    scaled.round_dp(0).to_u64()
}

/// Convert a floating-point price to fixed-point u64
///
/// Returns `None` for NaN, infinities, negative values and anything that
/// does not fit in u64 after scaling.
///
/// ```
/// use lob_sim::types::price::f64_to_fixed;
///
/// assert_eq!(f64_to_fixed(99.0), Some(9_900_000_000));
/// assert_eq!(f64_to_fixed(0.1 + 0.2), f64_to_fixed(0.3));
/// assert_eq!(f64_to_fixed(f64::NAN), None);
/// ```
pub fn f64_to_fixed(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    decimal_to_fixed(Decimal::from_f64(value)?)
}

/// Convert fixed-point u64 to a Decimal
pub fn fixed_to_decimal(value: u64) -> Decimal {
    Decimal::from(value) / Decimal::from(SCALE)
}

/// Convert fixed-point u64 to f64, for display and analytics only
pub fn fixed_to_f64(value: u64) -> f64 {
    value as f64 / SCALE as f64
}

/// Convert fixed-point u64 to a string with 8 decimal places
///
/// ```
/// use lob_sim::types::price::from_fixed;
///
/// assert_eq!(from_fixed(9_900_000_000), "99.00000000");
/// ```
pub fn from_fixed(value: u64) -> String {
    format!("{:.8}", fixed_to_decimal(value))
}

/// Convert fixed-point u64 to a string with trailing zeros trimmed
pub fn from_fixed_trimmed(value: u64) -> String {
    format!("{}", fixed_to_decimal(value).normalize())
}

// ============================================================================
// Unit Tests
// ============================================================================
