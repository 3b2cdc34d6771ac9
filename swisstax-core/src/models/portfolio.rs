use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::ProfileId;

/// The nine insurance categories tracked for a household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsuranceKind {
    /// Mandatory basic health insurance (LAMal).
    Health,
    SupplementaryHealth,
    Life,
    Disability,
    Household,
    Liability,
    Vehicle,
    Building,
    LegalProtection,
}

impl InsuranceKind {
    pub const ALL: [InsuranceKind; 9] = [
        Self::Health,
        Self::SupplementaryHealth,
        Self::Life,
        Self::Disability,
        Self::Household,
        Self::Liability,
        Self::Vehicle,
        Self::Building,
        Self::LegalProtection,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::SupplementaryHealth => "supplementary_health",
            Self::Life => "life",
            Self::Disability => "disability",
            Self::Household => "household",
            Self::Liability => "liability",
            Self::Vehicle => "vehicle",
            Self::Building => "building",
            Self::LegalProtection => "legal_protection",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

/// A persisted insurance policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceContract {
    pub id: i64,
    pub owner: ProfileId,
    pub kind: InsuranceKind,
    pub provider: String,
    pub annual_premium: Decimal,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Stock,
    Etf,
    Bond,
    Fund,
    Crypto,
    RealEstate,
    Commodity,
    Cash,
    Other,
}

impl AssetKind {
    pub const ALL: [AssetKind; 9] = [
        Self::Stock,
        Self::Etf,
        Self::Bond,
        Self::Fund,
        Self::Crypto,
        Self::RealEstate,
        Self::Commodity,
        Self::Cash,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stock => "stock",
            Self::Etf => "etf",
            Self::Bond => "bond",
            Self::Fund => "fund",
            Self::Crypto => "crypto",
            Self::RealEstate => "real_estate",
            Self::Commodity => "commodity",
            Self::Cash => "cash",
            Self::Other => "other",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
    }
}

/// A position held in an investment portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestmentAsset {
    pub id: i64,
    pub owner: ProfileId,
    pub kind: AssetKind,
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    pub currency: String,
}

impl InvestmentAsset {
    /// Quantity times the current price, or the purchase price when no quote exists.
    pub fn market_value(&self) -> Decimal {
        self.quantity * self.current_price.unwrap_or(self.purchase_price)
    }

    pub fn invested_value(&self) -> Decimal {
        self.quantity * self.purchase_price
    }
}
