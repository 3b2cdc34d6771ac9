//! Third-pillar (3a/3b) projection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{Annuity, ThirdPillarAccount, ThirdPillarKind};
use crate::pension::lpp::{LppParameters, project_capital, years_to_retirement};
use crate::pension::{PensionError, ensure_non_negative, ensure_rate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPillarProjection {
    pub name: String,
    pub kind: ThirdPillarKind,
    pub years_to_retirement: u32,
    pub capital_at_retirement: Decimal,
    /// Rent obtained by converting the capital at the default LPP rate.
    pub retirement: Annuity,
    pub death_capital: Decimal,
    /// Zero unless the policy insures a disability rent.
    pub disability: Annuity,
}

/// Projects a third-pillar account to the retirement age of `params`.
pub fn project_third_pillar(
    account: &ThirdPillarAccount,
    reference: NaiveDate,
    params: &LppParameters,
) -> Result<ThirdPillarProjection, PensionError> {
    ensure_non_negative("current capital", account.current_capital)?;
    ensure_non_negative("annual contribution", account.annual_contribution)?;
    ensure_rate("interest rate", account.interest_rate)?;

    let years = years_to_retirement(account.birth_date, reference, params.retirement_age);
    let capital = project_capital(
        account.current_capital,
        account.annual_contribution,
        account.interest_rate,
        years,
    )?;

    Ok(ThirdPillarProjection {
        name: account.name.clone(),
        kind: account.kind,
        years_to_retirement: years,
        capital_at_retirement: capital,
        retirement: Annuity::from_annual(round_half_up(capital * params.default_conversion_rate)),
        death_capital: account
            .insured_death_capital
            .unwrap_or(account.current_capital),
        disability: account.disability_annuity.unwrap_or_default(),
    })
}
