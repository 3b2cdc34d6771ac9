use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::Canton;

/// Outcome of a full tax computation for one profile.
///
/// All amounts are annual, in CHF, rounded to the centime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub canton: Option<Canton>,
    pub commune: Option<String>,
    pub taxable_income: Decimal,
    pub taxable_wealth: Decimal,
    pub federal_tax: Decimal,
    pub cantonal_tax: Decimal,
    pub communal_tax: Decimal,
    pub ecclesiastical_tax: Decimal,
    pub total_tax: Decimal,
    /// Total tax as a percentage of taxable income.
    pub effective_rate: Decimal,
}

impl TaxResult {
    /// The empty result returned when a required selection is missing.
    pub fn zero() -> Self {
        Self {
            canton: None,
            commune: None,
            taxable_income: Decimal::ZERO,
            taxable_wealth: Decimal::ZERO,
            federal_tax: Decimal::ZERO,
            cantonal_tax: Decimal::ZERO,
            communal_tax: Decimal::ZERO,
            ecclesiastical_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
        }
    }

    pub fn monthly_total(&self) -> Decimal {
        crate::calculations::common::round_half_up(self.total_tax / Decimal::from(12))
    }
}

/// Cantonal and communal share produced by a canton strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantonalTax {
    pub cantonal: Decimal,
    pub communal: Decimal,
}
