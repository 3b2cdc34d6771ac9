//! Portfolio valuation grouped by asset kind and by currency.
//!
//! Values are added up in their own currency; no exchange rate is applied,
//! so the overall totals are only meaningful for a single-currency portfolio.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percentage_of;
use crate::models::{AssetKind, InvestmentAsset};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioGroup {
    pub positions: usize,
    pub invested: Decimal,
    pub market_value: Decimal,
    pub gain: Decimal,
    /// Gain relative to the invested amount, in percent.
    pub gain_percent: Decimal,
    /// Share of the portfolio market value, in percent.
    pub share: Decimal,
}

impl PortfolioGroup {
    fn add(
        &mut self,
        asset: &InvestmentAsset,
    ) {
        self.positions += 1;
        self.invested += asset.invested_value();
        self.market_value += asset.market_value();
    }

    fn finish(
        mut self,
        portfolio_value: Decimal,
    ) -> Self {
        self.gain = self.market_value - self.invested;
        self.gain_percent = percentage_of(self.gain, self.invested);
        self.share = percentage_of(self.market_value, portfolio_value);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total: PortfolioGroup,
    pub by_kind: BTreeMap<AssetKind, PortfolioGroup>,
    pub by_currency: BTreeMap<String, PortfolioGroup>,
}

/// Values every position once and folds it into its kind and currency group.
pub fn summarize_portfolio(assets: &[InvestmentAsset]) -> PortfolioSummary {
    let mut total = PortfolioGroup::default();
    let mut by_kind: BTreeMap<AssetKind, PortfolioGroup> = BTreeMap::new();
    let mut by_currency: BTreeMap<String, PortfolioGroup> = BTreeMap::new();

    for asset in assets {
        total.add(asset);
        by_kind.entry(asset.kind).or_default().add(asset);
        by_currency
            .entry(asset.currency.trim().to_uppercase())
            .or_default()
            .add(asset);
    }

    let value = total.market_value;
    PortfolioSummary {
        total: total.finish(value),
        by_kind: by_kind
            .into_iter()
            .map(|(kind, group)| (kind, group.finish(value)))
            .collect(),
        by_currency: by_currency
            .into_iter()
            .map(|(currency, group)| (currency, group.finish(value)))
            .collect(),
    }
}
