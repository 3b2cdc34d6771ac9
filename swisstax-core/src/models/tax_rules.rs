use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Canton, Confession};

/// How the cantonal and communal tax of a canton is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxStrategy {
    /// Geneva: partial splitting with centimes additionnels.
    Geneva,
    /// Vaud: quotient familial over the cantonal scale.
    VaudSplitting,
    /// Shared Romandie scale with per-child deduction and family rebate.
    RomandieStandard,
    /// Flat-rate approximation for cantons without a dedicated scale.
    Generic,
}

/// Which shared Romandie scale a canton evaluates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    #[default]
    Standard,
    /// Low simple-tax scale paired with a high cantonal multiplier.
    HighCoefficient,
}

/// Per-canton parameters feeding the strategy selected by `strategy`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CantonTaxRule {
    pub canton: Canton,
    pub strategy: TaxStrategy,
    /// Multiplier applied to the simple tax to obtain the cantonal tax.
    pub cantonal_multiplier: Decimal,
    /// Flat deduction from income per dependent child.
    pub child_deduction: Decimal,
    #[serde(default)]
    pub scale: ScaleKind,
}

impl CantonTaxRule {
    /// Rule used for any canton without an entry in the rule map.
    pub fn generic(canton: Canton) -> Self {
        Self {
            canton,
            strategy: TaxStrategy::Generic,
            cantonal_multiplier: Decimal::ONE,
            child_deduction: Decimal::ZERO,
            scale: ScaleKind::Standard,
        }
    }
}

/// Communal multiplier, scoped to one canton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuneTaxRule {
    pub canton: Canton,
    pub commune: String,
    pub multiplier: Decimal,
}

/// Ecclesiastical tax rate, expressed as a fraction of the cantonal tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchTaxRule {
    pub canton: Canton,
    pub confession: Confession,
    pub rate: Decimal,
}
