//! Common utility functions for pricing calculations.
//!
//! This module provides shared functionality used across the formula
//! modules and the presenter, including rounding and range checks.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// This follows standard financial rounding conventions where values at exactly
/// 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(18666.666666)), dec!(18666.67));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    round_dp(value, 2)
}

/// Rounds a decimal value to `dp` decimal places, midpoints away from zero.
///
/// The result always carries exactly `dp` fractional digits, so
/// `round_dp(dec!(0.2), 4)` displays as `0.2000`.
pub fn round_dp(
    value: Decimal,
    dp: u32,
) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded
}

/// Returns `true` when `value` is a ratio in the closed interval `[0, 1]`.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::calculations::common::is_ratio;
///
/// assert!(is_ratio(dec!(0)));
/// assert!(is_ratio(dec!(1)));
/// assert!(!is_ratio(dec!(1.01)));
/// ```
pub fn is_ratio(value: Decimal) -> bool {
    value >= Decimal::ZERO && value <= Decimal::ONE
}
