//! Premium totals per insurance category.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{percentage_of, round_half_up};
use crate::models::{InsuranceContract, InsuranceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceCategory {
    pub kind: InsuranceKind,
    pub contracts: usize,
    pub annual_premium: Decimal,
    pub monthly_premium: Decimal,
    /// Share of the total annual premium, in percent.
    pub share: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceSummary {
    /// Categories with at least one active contract, in [`InsuranceKind`] order.
    pub categories: Vec<InsuranceCategory>,
    pub contracts: usize,
    pub annual_premium: Decimal,
    pub monthly_premium: Decimal,
}

impl InsuranceSummary {
    pub fn category(
        &self,
        kind: InsuranceKind,
    ) -> Option<&InsuranceCategory> {
        self.categories.iter().find(|c| c.kind == kind)
    }
}

/// Groups the active contracts by kind. Inactive contracts are ignored.
pub fn summarize_insurance(contracts: &[InsuranceContract]) -> InsuranceSummary {
    let mut by_kind: BTreeMap<InsuranceKind, (usize, Decimal)> = BTreeMap::new();
    for contract in contracts.iter().filter(|c| c.active) {
        let entry = by_kind.entry(contract.kind).or_default();
        entry.0 += 1;
        entry.1 += contract.annual_premium;
    }

    let annual_premium: Decimal = by_kind.values().map(|(_, premium)| *premium).sum();
    let twelve = Decimal::from(12);

    let categories = by_kind
        .into_iter()
        .map(|(kind, (count, premium))| InsuranceCategory {
            kind,
            contracts: count,
            annual_premium: premium,
            monthly_premium: round_half_up(premium / twelve),
            share: percentage_of(premium, annual_premium),
        })
        .collect::<Vec<_>>();

    InsuranceSummary {
        contracts: categories.iter().map(|c| c.contracts).sum(),
        categories,
        annual_premium,
        monthly_premium: round_half_up(annual_premium / twelve),
    }
}
