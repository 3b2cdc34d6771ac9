use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::non_negative;
use crate::models::{Canton, CivilStatus, Confession};

/// Deductions claimed against gross income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Contributions paid into a pillar 3a account.
    pub third_pillar: Decimal,
    pub mortgage_interest: Decimal,
    /// AVS/AI/APG, unemployment and LPP contributions withheld from salary.
    pub social_charges: Decimal,
    pub other: Decimal,
}

impl Deductions {
    pub fn total(&self) -> Decimal {
        self.third_pillar + self.mortgage_interest + self.social_charges + self.other
    }
}

/// Validated tax inputs for one taxpayer (or married couple).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    pub canton: Canton,
    pub commune: String,
    pub civil_status: CivilStatus,
    #[serde(default)]
    pub confession: Confession,
    pub gross_income: Decimal,
    pub net_wealth: Decimal,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub deductions: Deductions,
}

impl TaxProfile {
    /// Income left after deductions, never below zero.
    pub fn taxable_income(&self) -> Decimal {
        non_negative(self.gross_income - self.deductions.total())
    }

    /// Net wealth, never below zero.
    pub fn taxable_wealth(&self) -> Decimal {
        non_negative(self.net_wealth)
    }

    /// Copy of this profile with the pillar 3a deduction removed.
    pub fn without_third_pillar(&self) -> Self {
        Self {
            deductions: Deductions {
                third_pillar: Decimal::ZERO,
                ..self.deductions.clone()
            },
            ..self.clone()
        }
    }
}
