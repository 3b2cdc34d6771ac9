//! Progressive bracket formula shared by every scale.

use rust_decimal::Decimal;

use crate::models::BracketTable;

/// Tax owed on `amount` under a progressive `table`.
///
/// Finds the bracket containing the amount and returns its cumulative base
/// plus the marginal rate on the part above its lower bound. Amounts beyond
/// the last finite bound are extrapolated with the last bracket's rate.
///
/// The amount must already be clamped to zero by the caller; a negative
/// amount is treated as zero.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use swisstax_core::calculations::progressive_tax;
/// use swisstax_core::models::BracketTable;
///
/// let table = BracketTable::from_rates(&[
///     (dec!(0), dec!(0)),
///     (dec!(10000), dec!(0.05)),
///     (dec!(30000), dec!(0.10)),
/// ])
/// .unwrap();
///
/// assert_eq!(progressive_tax(dec!(40000), &table), dec!(2000));
/// ```
pub fn progressive_tax(
    amount: Decimal,
    table: &BracketTable,
) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let bracket = table.bracket_for(amount);
    bracket.base_tax + (amount - bracket.min_income) * bracket.tax_rate
}

/// Average rate of `table` at `amount`, zero for a zero amount.
pub fn average_rate(
    amount: Decimal,
    table: &BracketTable,
) -> Decimal {
    if amount <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    progressive_tax(amount, table) / amount
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::reference::scales;

    fn geneva() -> BracketTable {
        BracketTable::from_rates(&scales::GENEVA_INCOME).unwrap()
    }

    #[test]
    fn zero_amount_owes_nothing() {
        assert_eq!(progressive_tax(dec!(0), &geneva()), dec!(0));
    }

    #[test]
    fn first_bracket_is_tax_free() {
        assert_eq!(progressive_tax(dec!(18000), &geneva()), dec!(0));
    }

    #[test]
    fn geneva_eighty_thousand_uses_fifteen_and_a_half_percent_row() {
        // 7828.05 + (80000 - 76812) * 0.155
        assert_eq!(progressive_tax(dec!(80000), &geneva()), dec!(8322.19));
    }

    #[test]
    fn amount_at_boundary_equals_cumulative_base() {
        assert_eq!(progressive_tax(dec!(76812), &geneva()), dec!(7828.05));
    }

    #[test]
    fn tax_is_continuous_across_boundaries() {
        let table = geneva();

        for bracket in table.brackets().iter().skip(1) {
            let just_below = bracket.min_income - dec!(0.01);
            let below = progressive_tax(just_below, &table);
            let at = progressive_tax(bracket.min_income, &table);

            assert!(at - below <= dec!(0.01), "jump at {}", bracket.min_income);
            assert_eq!(at, bracket.base_tax);
        }
    }

    #[test]
    fn tax_is_monotonic_in_amount() {
        let table = geneva();
        let mut previous = Decimal::ZERO;

        for step in 0..=80 {
            let amount = Decimal::from(step * 10_000);
            let tax = progressive_tax(amount, &table);

            assert!(tax >= previous, "tax decreased at {amount}");
            previous = tax;
        }
    }

    #[test]
    fn amount_past_last_bound_extrapolates_last_rate() {
        let table = geneva();
        let last = table.brackets().last().unwrap().clone();

        let tax = progressive_tax(last.min_income + dec!(100000), &table);

        assert_eq!(tax, last.base_tax + dec!(19000));
    }

    #[test]
    fn average_rate_is_zero_for_zero_amount() {
        assert_eq!(average_rate(dec!(0), &geneva()), dec!(0));
    }

    #[test]
    fn average_rate_grows_with_income() {
        let table = geneva();

        assert!(average_rate(dec!(50000), &table) < average_rate(dec!(150000), &table));
    }
}
