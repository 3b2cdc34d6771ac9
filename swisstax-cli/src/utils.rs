use rust_decimal::Decimal;
use swisstax_core::calculations::common::{round_half_up, round_to_franc};

/// Groups the integer digits of `digits` by three with an apostrophe.
fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\'');
        }
        grouped.push(c);
    }
    grouped
}

/// Formats an amount the way Swiss statements print it: `CHF 80'000`.
///
/// Rounded to whole francs, half-up.
pub fn format_chf(amount: Decimal) -> String {
    let rounded = round_to_franc(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().trunc().to_string();
    format!("CHF {sign}{}", group_thousands(&digits))
}

/// Formats a percentage with two decimals: `20.07 %`.
pub fn format_percent(value: Decimal) -> String {
    format!("{:.2} %", round_half_up(value))
}

/// Formats an optional amount, using "-" when `None`.
pub fn opt_chf_display(amount: Option<Decimal>) -> String {
    amount.map(format_chf).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn format_chf_groups_thousands() {
        assert_eq!(format_chf(dec!(80000)), "CHF 80'000");
        assert_eq!(format_chf(dec!(1234567.89)), "CHF 1'234'568");
        assert_eq!(format_chf(dec!(999)), "CHF 999");
    }

    #[test]
    fn format_chf_rounds_half_up() {
        assert_eq!(format_chf(dec!(16052.50)), "CHF 16'053");
        assert_eq!(format_chf(dec!(16052.49)), "CHF 16'052");
    }

    #[test]
    fn format_chf_zero_and_negative() {
        assert_eq!(format_chf(dec!(0)), "CHF 0");
        assert_eq!(format_chf(dec!(-0.2)), "CHF 0");
        assert_eq!(format_chf(dec!(-1500)), "CHF -1'500");
    }

    #[test]
    fn format_percent_keeps_two_decimals() {
        assert_eq!(format_percent(dec!(20.07)), "20.07 %");
        assert_eq!(format_percent(dec!(7)), "7.00 %");
    }

    #[test]
    fn opt_display_uses_dash_for_none() {
        assert_eq!(opt_chf_display(None), "-");
        assert_eq!(opt_chf_display(Some(dec!(1200))), "CHF 1'200");
    }
}
