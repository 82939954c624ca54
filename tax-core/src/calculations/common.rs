//! Shared decimal helpers for the tax pipeline.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a decimal value to two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(35000.145)), dec!(35000.15));
/// assert_eq!(round_half_up(dec!(35000.144)), dec!(35000.14));
/// assert_eq!(round_half_up(dec!(0.1)), dec!(0.10));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Floors a value at zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(-150.00)), dec!(0));
/// assert_eq!(non_negative(dec!(150.00)), dec!(150.00));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    if value < Decimal::ZERO { Decimal::ZERO } else { value }
}

/// Limits `value` to at most `limit`.
pub fn cap(
    value: Decimal,
    limit: Decimal,
) -> Decimal {
    if value > limit { limit } else { value }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        let result = round_half_up(dec!(123.454));

        assert_eq!(result, dec!(123.45));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        let result = round_half_up(dec!(123.455));

        assert_eq!(result, dec!(123.46));
    }

    #[test]
    fn round_half_up_keeps_exact_bracket_amounts() {
        let result = round_half_up(dec!(0.10));

        assert_eq!(result, dec!(0.10));
    }

    #[test]
    fn round_half_up_handles_zero() {
        let result = round_half_up(Decimal::ZERO);

        assert_eq!(result, dec!(0.00));
    }

    #[test]
    fn round_half_up_handles_large_values() {
        let result = round_half_up(dec!(999999999.995));

        assert_eq!(result, dec!(1000000000.00));
    }

    // =========================================================================
    // non_negative tests
    // =========================================================================

    #[test]
    fn non_negative_clamps_negative_to_zero() {
        let result = non_negative(dec!(-0.01));

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn non_negative_keeps_zero() {
        let result = non_negative(Decimal::ZERO);

        assert_eq!(result, Decimal::ZERO);
    }

    #[test]
    fn non_negative_keeps_positive() {
        let result = non_negative(dec!(440000));

        assert_eq!(result, dec!(440000));
    }

    // =========================================================================
    // cap tests
    // =========================================================================

    #[test]
    fn cap_limits_value_above_limit() {
        let result = cap(dec!(120000), dec!(100000));

        assert_eq!(result, dec!(100000));
    }

    #[test]
    fn cap_keeps_value_at_limit() {
        let result = cap(dec!(50000), dec!(50000));

        assert_eq!(result, dec!(50000));
    }

    #[test]
    fn cap_keeps_value_below_limit() {
        let result = cap(dec!(20000), dec!(50000));

        assert_eq!(result, dec!(20000));
    }
}
