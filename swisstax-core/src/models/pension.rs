use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;
use crate::models::{CivilStatus, ProfileId};

/// First-pillar (AVS) contribution record of one insured person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvsAccount {
    pub owner: ProfileId,
    pub marital_status: CivilStatus,
    /// Average determinant annual income, used when no yearly incomes exist.
    pub average_income: Decimal,
    pub years_contributed: u32,
    pub active: bool,
    #[serde(default)]
    pub children: u32,
}

/// One year of income on an AVS account statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyIncome {
    pub owner: ProfileId,
    pub year: i32,
    pub income: Decimal,
    /// True when the figure is a forecast rather than a booked income.
    #[serde(default)]
    pub estimated: bool,
}

/// Monthly and annual form of the same pension amount.
///
/// The two fields are kept synchronized: editing one recomputes the other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annuity {
    monthly: Decimal,
    annual: Decimal,
}

impl Annuity {
    const MONTHS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

    pub fn from_monthly(monthly: Decimal) -> Self {
        Self {
            monthly,
            annual: monthly * Self::MONTHS,
        }
    }

    /// The monthly amount is rounded to the centime.
    pub fn from_annual(annual: Decimal) -> Self {
        Self {
            monthly: round_half_up(annual / Self::MONTHS),
            annual,
        }
    }

    pub fn monthly(&self) -> Decimal {
        self.monthly
    }

    pub fn annual(&self) -> Decimal {
        self.annual
    }

    pub fn set_monthly(
        &mut self,
        monthly: Decimal,
    ) {
        *self = Self::from_monthly(monthly);
    }

    pub fn set_annual(
        &mut self,
        annual: Decimal,
    ) {
        *self = Self::from_annual(annual);
    }

    pub fn scaled(
        &self,
        factor: Decimal,
    ) -> Self {
        Self::from_annual(round_half_up(self.annual * factor))
    }
}

impl std::ops::Add for Annuity {
    type Output = Annuity;

    fn add(
        self,
        rhs: Self,
    ) -> Self::Output {
        Self::from_annual(self.annual + rhs.annual)
    }
}

impl std::iter::Sum for Annuity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Annuity::default(), |acc, a| acc + a)
    }
}

/// Second-pillar (occupational) pension account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LppAccount {
    pub owner: ProfileId,
    pub name: String,
    pub birth_date: NaiveDate,
    pub current_capital: Decimal,
    /// Employer plus employee savings credit per year.
    pub annual_contribution: Decimal,
    /// Interest credited on the savings capital each year.
    pub interest_rate: Decimal,
    /// Conversion rate from retirement capital to annual rent.
    pub conversion_rate: Decimal,
    /// Figures printed on the last pension fund certificate, if any.
    #[serde(default)]
    pub projected_retirement: Option<Annuity>,
    #[serde(default)]
    pub projected_disability: Option<Annuity>,
    #[serde(default)]
    pub projected_death_capital: Option<Decimal>,
}

/// Pillar 3a (tied) or 3b (free) savings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThirdPillarKind {
    #[serde(rename = "3a")]
    Tied,
    #[serde(rename = "3b")]
    Free,
}

/// Third-pillar savings account or policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPillarAccount {
    pub owner: ProfileId,
    pub name: String,
    pub kind: ThirdPillarKind,
    pub birth_date: NaiveDate,
    pub current_capital: Decimal,
    pub annual_contribution: Decimal,
    pub interest_rate: Decimal,
    /// Guaranteed death capital of an insurance-linked policy.
    #[serde(default)]
    pub insured_death_capital: Option<Decimal>,
    /// Disability rent of an insurance-linked policy.
    #[serde(default)]
    pub disability_annuity: Option<Annuity>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn from_monthly_multiplies_by_twelve() {
        let annuity = Annuity::from_monthly(dec!(1234.56));

        assert_eq!(annuity.annual(), dec!(14814.72));
    }

    #[test]
    fn from_annual_divides_by_twelve_and_rounds() {
        let annuity = Annuity::from_annual(dec!(10000));

        assert_eq!(annuity.monthly(), dec!(833.33));
        assert_eq!(annuity.annual(), dec!(10000));
    }

    #[test]
    fn editing_monthly_resynchronizes_annual() {
        let mut annuity = Annuity::from_annual(dec!(24000));
        annuity.set_monthly(dec!(2100));

        assert_eq!(annuity.annual(), dec!(25200));
    }

    #[test]
    fn editing_annual_resynchronizes_monthly() {
        let mut annuity = Annuity::from_monthly(dec!(2100));
        annuity.set_annual(dec!(30000));

        assert_eq!(annuity.monthly(), dec!(2500));
    }

    #[test]
    fn sum_adds_annual_amounts() {
        let total: Annuity = [Annuity::from_annual(dec!(12000)), Annuity::from_annual(dec!(6000))]
            .into_iter()
            .sum();

        assert_eq!(total.annual(), dec!(18000));
        assert_eq!(total.monthly(), dec!(1500));
    }
}
