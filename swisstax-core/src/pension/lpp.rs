//! Second-pillar (LPP/BVG) projection.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{Annuity, LppAccount};
use crate::pension::{PensionError, ensure_non_negative, ensure_rate};

/// Legal parameters of the occupational pension projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LppParameters {
    pub retirement_age: u32,
    /// Used when an account carries no conversion rate of its own.
    pub default_conversion_rate: Decimal,
    /// Spouse annuity as a share of the disability annuity.
    pub spouse_rate: Decimal,
    /// Orphan annuity as a share of the disability annuity.
    pub orphan_rate: Decimal,
}

impl Default for LppParameters {
    fn default() -> Self {
        Self {
            retirement_age: 65,
            default_conversion_rate: dec!(0.068),
            spouse_rate: dec!(0.60),
            orphan_rate: dec!(0.20),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LppProjection {
    pub name: String,
    pub years_to_retirement: u32,
    pub capital_at_retirement: Decimal,
    pub retirement: Annuity,
    pub disability: Annuity,
    pub spouse: Annuity,
    pub orphan: Annuity,
    pub death_capital: Decimal,
}

/// Full years left until `retirement_age`, zero once it is reached.
pub fn years_to_retirement(
    birth_date: NaiveDate,
    reference: NaiveDate,
    retirement_age: u32,
) -> u32 {
    let mut age = reference.year() - birth_date.year();
    if (reference.month(), reference.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    let age = u32::try_from(age.max(0)).unwrap_or(0);
    retirement_age.saturating_sub(age)
}

/// Compounds `capital` for `years`, crediting interest before adding the
/// yearly contribution. With a zero rate the growth is linear.
///
/// # Errors
///
/// [`PensionError::Overflow`] when the capital leaves the `Decimal` range.
pub fn project_capital(
    capital: Decimal,
    annual_contribution: Decimal,
    interest_rate: Decimal,
    years: u32,
) -> Result<Decimal, PensionError> {
    let growth = Decimal::ONE + interest_rate;
    let projected = (0..years).try_fold(capital, |c, _| {
        c.checked_mul(growth)
            .and_then(|grown| grown.checked_add(annual_contribution))
            .ok_or(PensionError::Overflow {
                field: "capital at retirement",
            })
    })?;
    Ok(round_half_up(projected))
}

/// Projects retirement, disability and death benefits of an LPP account.
///
/// Figures from the last pension fund certificate take precedence over the
/// computed ones.
///
/// # Errors
///
/// Fails on negative capital or contributions, on rates outside `[0, 1]`,
/// or when the projected capital overflows.
pub fn project_lpp(
    account: &LppAccount,
    reference: NaiveDate,
    params: &LppParameters,
) -> Result<LppProjection, PensionError> {
    ensure_non_negative("current capital", account.current_capital)?;
    ensure_non_negative("annual contribution", account.annual_contribution)?;
    ensure_rate("interest rate", account.interest_rate)?;
    ensure_rate("conversion rate", account.conversion_rate)?;

    let conversion = if account.conversion_rate.is_zero() {
        params.default_conversion_rate
    } else {
        account.conversion_rate
    };
    let years = years_to_retirement(account.birth_date, reference, params.retirement_age);

    let capital = project_capital(
        account.current_capital,
        account.annual_contribution,
        account.interest_rate,
        years,
    )?;
    let retirement = account
        .projected_retirement
        .unwrap_or_else(|| Annuity::from_annual(round_half_up(capital * conversion)));

    let disability = match account.projected_disability {
        Some(certified) => certified,
        None => {
            let without_interest = project_capital(
                account.current_capital,
                account.annual_contribution,
                Decimal::ZERO,
                years,
            )?;
            Annuity::from_annual(round_half_up(without_interest * conversion))
        }
    };

    debug!(account = %account.name, years, %capital, "projected LPP account");

    Ok(LppProjection {
        name: account.name.clone(),
        years_to_retirement: years,
        capital_at_retirement: capital,
        retirement,
        disability,
        spouse: disability.scaled(params.spouse_rate),
        orphan: disability.scaled(params.orphan_rate),
        death_capital: account
            .projected_death_capital
            .unwrap_or(account.current_capital),
    })
}
