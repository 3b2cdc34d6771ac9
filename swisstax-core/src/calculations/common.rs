//! Common utility functions for tax and pension calculations.
//!
//! This module provides shared rounding and clamping helpers used across the
//! tax strategies, the pension projections and the aggregators.

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
/// use swisstax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a decimal value to whole francs, half-up.
pub fn round_to_franc(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a non-negative amount to the next lower multiple of 100 CHF.
///
/// Cantonal scales are published per 100 francs of taxable income, so the
/// rate-determining income is truncated before the table lookup.
///
/// ```
/// use rust_decimal_macros::dec;
/// use swisstax_core::calculations::common::floor_to_hundred;
///
/// assert_eq!(floor_to_hundred(dec!(28571.43)), dec!(28500));
/// assert_eq!(floor_to_hundred(dec!(99.99)), dec!(0));
/// ```
pub fn floor_to_hundred(value: Decimal) -> Decimal {
    let hundred = Decimal::ONE_HUNDRED;
    (value / hundred).floor() * hundred
}

/// Clamps a value to zero from below.
///
/// Deductions can drive raw income negative; every bracket lookup expects a
/// non-negative amount.
pub fn non_negative(value: Decimal) -> Decimal {
    max(value, Decimal::ZERO)
}

/// Returns the maximum of two decimal values.
///
/// ```
/// use rust_decimal_macros::dec;
/// use swisstax_core::calculations::common::max;
///
/// assert_eq!(max(dec!(100.00), dec!(200.00)), dec!(200.00));
/// assert_eq!(max(dec!(-100.00), dec!(-200.00)), dec!(-100.00));
/// ```
pub fn max(
    a: Decimal,
    b: Decimal,
) -> Decimal {
    if a > b { a } else { b }
}

/// Share of `part` in `total` as a percentage with two decimals.
///
/// A zero total yields a zero share rather than a division error.
pub fn percentage_of(
    part: Decimal,
    total: Decimal,
) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    round_half_up(part / total * Decimal::ONE_HUNDRED)
}
