//! First-pillar (AVS/AHV) pension projection.
//!
//! The full-scale pension follows the statutory two-segment formula on the
//! average determinant annual income `I`, with `M` the minimum monthly
//! pension:
//!
//! | Segment          | Monthly pension              |
//! |------------------|------------------------------|
//! | `I ≤ 36 × M`     | `0.74 × M + 13/600 × I`      |
//! | `I > 36 × M`     | `1.04 × M + 8/600 × I`       |
//!
//! The result is clamped to `[M, 2 × M]` and then pro-rated by the share of
//! contribution years out of a full career of 44 years.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::models::{Annuity, AvsAccount, CivilStatus, YearlyIncome};
use crate::pension::{PensionError, ensure_non_negative};

/// Statutory AVS amounts and ratios.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvsParameters {
    pub min_monthly: Decimal,
    pub max_monthly: Decimal,
    /// Contribution years of a complete career.
    pub full_years: u32,
    /// Supplement per child, as a share of the old-age pension.
    pub child_rate: Decimal,
    pub widow_rate: Decimal,
    pub orphan_rate: Decimal,
    /// Ceiling of a married couple's two pensions, as a share of one maximum.
    pub couple_cap_rate: Decimal,
}

impl Default for AvsParameters {
    fn default() -> Self {
        Self {
            min_monthly: dec!(1260),
            max_monthly: dec!(2520),
            full_years: 44,
            child_rate: dec!(0.40),
            widow_rate: dec!(0.80),
            orphan_rate: dec!(0.40),
            couple_cap_rate: dec!(1.5),
        }
    }
}

/// Projected AVS benefits for one insured person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvsProjection {
    pub determinant_income: Decimal,
    pub years_contributed: u32,
    pub old_age: Annuity,
    /// Total supplement for all children.
    pub child_supplement: Annuity,
    pub disability: Annuity,
    pub widow: Annuity,
    /// Pension per orphan.
    pub orphan: Annuity,
}

/// Average determinant income: the mean of the yearly incomes, or the
/// account's stored average when no yearly income is recorded.
///
/// Yearly incomes are not revalued.
pub fn determinant_income(
    account: &AvsAccount,
    incomes: &[YearlyIncome],
) -> Decimal {
    if incomes.is_empty() {
        return account.average_income;
    }
    let total: Decimal = incomes.iter().map(|y| y.income).sum();
    round_half_up(total / Decimal::from(incomes.len()))
}

/// Full-scale monthly pension for an average income, before pro-rating.
pub fn full_scale_monthly(
    income: Decimal,
    params: &AvsParameters,
) -> Decimal {
    let threshold = params.min_monthly * dec!(36);
    let raw = if income <= threshold {
        dec!(0.74) * params.min_monthly + income * dec!(13) / dec!(600)
    } else {
        dec!(1.04) * params.min_monthly + income * dec!(8) / dec!(600)
    };

    raw.max(params.min_monthly).min(params.max_monthly)
}

/// Projects the AVS benefits of `account`.
///
/// An inactive account no longer contributes, so its estimated yearly
/// incomes are left out and only booked years count.
///
/// # Errors
///
/// Fails when the stored average or any yearly income is negative.
pub fn project_avs(
    account: &AvsAccount,
    incomes: &[YearlyIncome],
    params: &AvsParameters,
) -> Result<AvsProjection, PensionError> {
    ensure_non_negative("average income", account.average_income)?;
    for yearly in incomes {
        ensure_non_negative("yearly income", yearly.income)?;
    }

    let counted: Vec<YearlyIncome> = incomes
        .iter()
        .filter(|yearly| account.active || !yearly.estimated)
        .cloned()
        .collect();
    let income = determinant_income(account, &counted);
    let years = account.years_contributed.min(params.full_years);
    let scale = if params.full_years == 0 {
        Decimal::ONE
    } else {
        Decimal::from(years) / Decimal::from(params.full_years)
    };

    let monthly = round_half_up(full_scale_monthly(income, params) * scale);
    let old_age = Annuity::from_monthly(monthly);
    debug!(%income, years, %monthly, "projected AVS pension");

    Ok(AvsProjection {
        determinant_income: income,
        years_contributed: account.years_contributed,
        old_age,
        child_supplement: old_age.scaled(params.child_rate * Decimal::from(account.children)),
        disability: old_age,
        widow: old_age.scaled(params.widow_rate),
        orphan: old_age.scaled(params.orphan_rate),
    })
}

/// Reduces the two old-age pensions of a married couple so that their sum
/// does not exceed the couple ceiling. Both are cut in proportion.
pub fn couple_cap(
    first: &Annuity,
    second: &Annuity,
    params: &AvsParameters,
) -> (Annuity, Annuity) {
    let ceiling = Annuity::from_monthly(params.max_monthly * params.couple_cap_rate).annual();
    let total = first.annual() + second.annual();
    if total <= ceiling || total.is_zero() {
        return (*first, *second);
    }

    let factor = ceiling / total;
    (first.scaled(factor), second.scaled(factor))
}

/// Projects two spouses. When both accounts are married the old-age
/// pensions are reduced to the couple ceiling with [`couple_cap`].
pub fn project_couple(
    first: (&AvsAccount, &[YearlyIncome]),
    second: (&AvsAccount, &[YearlyIncome]),
    params: &AvsParameters,
) -> Result<(AvsProjection, AvsProjection), PensionError> {
    let mut a = project_avs(first.0, first.1, params)?;
    let mut b = project_avs(second.0, second.1, params)?;

    let married = first.0.marital_status == CivilStatus::Married
        && second.0.marital_status == CivilStatus::Married;
    if married {
        let (capped_a, capped_b) = couple_cap(&a.old_age, &b.old_age, params);
        if capped_a != a.old_age || capped_b != b.old_age {
            debug!(
                first = %a.old_age.monthly(),
                second = %b.old_age.monthly(),
                "couple ceiling applied"
            );
        }
        a.old_age = capped_a;
        b.old_age = capped_b;
    }
    Ok((a, b))
}
