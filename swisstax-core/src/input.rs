//! Parsing of user-entered amounts and tax profile forms.
//!
//! Two flavours are offered for every conversion. The typed one returns a
//! `Result` and lets the caller reject bad input. The lenient one logs a
//! warning and substitutes zero, which is what a form that recomputes on
//! every keystroke wants.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::{Canton, CivilStatus, Confession, Deductions, TaxProfile};

/// Error returned when a string cannot be parsed as an amount.
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

impl ParseAmountError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// True for the one or two digits following a decimal comma.
fn is_decimal_tail(tail: &str) -> bool {
    (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit())
}

/// Strips currency and thousands separators: `"CHF 80'000.50"` → `"80000.50"`.
///
/// A comma followed by one or two digits, and by no later point, is the
/// decimal separator: `"1234,50"` → `"1234.50"`.
fn normalize_amount(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix("CHF")
        .or_else(|| trimmed.strip_prefix("chf"))
        .unwrap_or(trimmed);

    let stripped: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}' | ' ' | '\u{a0}' | '\u{202f}'))
        .collect();

    match (stripped.rfind(','), stripped.rfind('.')) {
        (Some(comma), dot)
            if dot.is_none_or(|dot| dot < comma) && is_decimal_tail(&stripped[comma + 1..]) =>
        {
            let (whole, fraction) = stripped.split_at(comma);
            format!("{}.{}", whole.replace(['.', ','], ""), &fraction[1..])
        }
        _ => stripped.replace(',', ""),
    }
}

/// Parses an amount written the Swiss way.
///
/// Apostrophes, spaces and commas are treated as thousands separators and a
/// leading `CHF` is ignored. A comma before the last one or two digits is a
/// decimal comma. Empty input is zero.
///
/// ```
/// use rust_decimal_macros::dec;
/// use swisstax_core::input::parse_amount;
///
/// assert_eq!(parse_amount("CHF 80'000").unwrap(), dec!(80000));
/// assert_eq!(parse_amount("1234,50").unwrap(), dec!(1234.50));
/// assert_eq!(parse_amount("").unwrap(), dec!(0));
/// assert!(parse_amount("abc").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| ParseAmountError {
        input: s.to_string(),
        source: e,
    })
}

/// Parses an amount, substituting zero for unparseable input.
pub fn parse_amount_or_zero(s: &str) -> Decimal {
    parse_amount(s).unwrap_or_else(|e| {
        warn!(input = %s, "invalid amount coerced to zero: {}", e);
        Decimal::ZERO
    })
}

/// Errors collected while validating a [`TaxProfileForm`].
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid tax profile: {}", errors.join("; "))]
pub struct ProfileFormError {
    pub errors: Vec<String>,
}

/// Raw tax profile as entered in a form or a config file.
///
/// Every field is a string so that partially filled forms can be held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxProfileForm {
    pub canton: String,
    pub commune: String,
    pub civil_status: String,
    pub confession: String,
    pub gross_income: String,
    pub net_wealth: String,
    pub children: String,
    pub third_pillar: String,
    pub mortgage_interest: String,
    pub social_charges: String,
    pub other_deductions: String,
}

impl TaxProfileForm {
    /// Validates every field and reports all problems at once.
    pub fn validate(&self) -> Result<TaxProfile, ProfileFormError> {
        let mut errors = Vec::new();

        let canton = Canton::parse(&self.canton);
        if canton.is_none() {
            errors.push(format!("unknown canton '{}'", self.canton));
        }
        if self.commune.trim().is_empty() {
            errors.push("commune is required".to_string());
        }
        let civil_status = CivilStatus::parse(&self.civil_status);
        if civil_status.is_none() {
            errors.push(format!("unknown civil status '{}'", self.civil_status));
        }
        let confession = Confession::parse(&self.confession);
        if confession.is_none() {
            errors.push(format!("unknown confession '{}'", self.confession));
        }

        let mut amount = |field: &str, value: &str| match parse_amount(value) {
            Ok(v) if v < Decimal::ZERO => {
                errors.push(format!("{field} must not be negative"));
                Decimal::ZERO
            }
            Ok(v) => v,
            Err(e) => {
                errors.push(format!("{field}: {e}"));
                Decimal::ZERO
            }
        };
        let gross_income = amount("gross income", &self.gross_income);
        let net_wealth = amount("net wealth", &self.net_wealth);
        let deductions = Deductions {
            third_pillar: amount("third pillar", &self.third_pillar),
            mortgage_interest: amount("mortgage interest", &self.mortgage_interest),
            social_charges: amount("social charges", &self.social_charges),
            other: amount("other deductions", &self.other_deductions),
        };

        let children = match parse_children(&self.children) {
            Some(n) => n,
            None => {
                errors.push(format!("invalid number of children '{}'", self.children));
                0
            }
        };

        match (canton, civil_status, confession) {
            (Some(canton), Some(civil_status), Some(confession)) if errors.is_empty() => {
                Ok(TaxProfile {
                    canton,
                    commune: self.commune.trim().to_string(),
                    civil_status,
                    confession,
                    gross_income,
                    net_wealth,
                    children,
                    deductions,
                })
            }
            _ => Err(ProfileFormError { errors }),
        }
    }

    /// Builds a profile the forgiving way.
    ///
    /// Returns `None` while canton, commune or civil status is missing.
    /// Unparseable amounts and child counts become zero and an unknown
    /// confession becomes [`Confession::None`].
    pub fn to_profile_lenient(&self) -> Option<TaxProfile> {
        let canton = Canton::parse(&self.canton)?;
        let civil_status = CivilStatus::parse(&self.civil_status)?;
        let commune = self.commune.trim();
        if commune.is_empty() {
            return None;
        }

        Some(TaxProfile {
            canton,
            commune: commune.to_string(),
            civil_status,
            confession: Confession::parse(&self.confession).unwrap_or_default(),
            gross_income: parse_amount_or_zero(&self.gross_income),
            net_wealth: parse_amount_or_zero(&self.net_wealth),
            children: parse_children(&self.children).unwrap_or_else(|| {
                warn!(input = %self.children, "invalid child count coerced to zero");
                0
            }),
            deductions: Deductions {
                third_pillar: parse_amount_or_zero(&self.third_pillar),
                mortgage_interest: parse_amount_or_zero(&self.mortgage_interest),
                social_charges: parse_amount_or_zero(&self.social_charges),
                other: parse_amount_or_zero(&self.other_deductions),
            },
        })
    }
}

fn parse_children(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0);
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn form() -> TaxProfileForm {
        TaxProfileForm {
            canton: "GE".to_string(),
            commune: " Genève ".to_string(),
            civil_status: "married".to_string(),
            confession: "".to_string(),
            gross_income: "120'000".to_string(),
            net_wealth: "CHF 250 000".to_string(),
            children: "2".to_string(),
            third_pillar: "7,056".to_string(),
            mortgage_interest: "".to_string(),
            social_charges: "14000.50".to_string(),
            other_deductions: "0".to_string(),
        }
    }

    #[test]
    fn parse_amount_accepts_swiss_separators() {
        assert_eq!(parse_amount("80'000").unwrap(), dec!(80000));
        assert_eq!(parse_amount("80\u{2019}000.25").unwrap(), dec!(80000.25));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
        assert_eq!(parse_amount("12 500").unwrap(), dec!(12500));
        assert_eq!(parse_amount("1,234").unwrap(), dec!(1234));
    }

    #[test]
    fn parse_amount_reads_decimal_comma() {
        assert_eq!(parse_amount("1234,50").unwrap(), dec!(1234.50));
        assert_eq!(parse_amount("7056,80").unwrap(), dec!(7056.80));
        assert_eq!(parse_amount("CHF 1'234,5").unwrap(), dec!(1234.5));
        assert_eq!(parse_amount("1.234,50").unwrap(), dec!(1234.50));
    }

    #[test]
    fn parse_amount_strips_currency_prefix() {
        assert_eq!(parse_amount("CHF 1'000").unwrap(), dec!(1000));
        assert_eq!(parse_amount("  chf 42  ").unwrap(), dec!(42));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount("").unwrap(), dec!(0));
        assert_eq!(parse_amount("   ").unwrap(), dec!(0));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        let err = parse_amount("12abc").unwrap_err();

        assert_eq!(err.input(), "12abc");
    }

    #[test]
    fn parse_amount_or_zero_coerces_garbage() {
        assert_eq!(parse_amount_or_zero("n/a"), dec!(0));
        assert_eq!(parse_amount_or_zero("99.5"), dec!(99.5));
    }

    #[test]
    fn validate_builds_profile() {
        let profile = form().validate().unwrap();

        assert_eq!(profile.canton, Canton::Geneva);
        assert_eq!(profile.commune, "Genève");
        assert_eq!(profile.civil_status, CivilStatus::Married);
        assert_eq!(profile.confession, Confession::None);
        assert_eq!(profile.gross_income, dec!(120000));
        assert_eq!(profile.net_wealth, dec!(250000));
        assert_eq!(profile.children, 2);
        assert_eq!(profile.deductions.third_pillar, dec!(7056));
        assert_eq!(profile.deductions.total(), dec!(21056.50));
    }

    #[test]
    fn validate_reports_every_problem() {
        let mut bad = form();
        bad.canton = "XX".to_string();
        bad.gross_income = "lots".to_string();
        bad.net_wealth = "-5".to_string();
        bad.children = "two".to_string();

        let err = bad.validate().unwrap_err();

        assert_eq!(err.errors.len(), 4);
        assert!(err.errors[0].contains("canton"));
    }

    #[test]
    fn lenient_profile_requires_selections() {
        let mut missing = form();
        missing.commune = "  ".to_string();

        assert_eq!(missing.to_profile_lenient(), None);
        assert_eq!(TaxProfileForm::default().to_profile_lenient(), None);
    }

    #[test]
    fn lenient_profile_zeroes_bad_numbers() {
        let mut sloppy = form();
        sloppy.gross_income = "lots".to_string();
        sloppy.children = "?".to_string();
        sloppy.confession = "pastafarian".to_string();

        let profile = sloppy.to_profile_lenient().unwrap();

        assert_eq!(profile.gross_income, dec!(0));
        assert_eq!(profile.children, 0);
        assert_eq!(profile.confession, Confession::None);
    }
}
