//! Static reference data: scales, canton rules, commune multipliers and
//! church rates.
//!
//! The literal tables are versioned with the deployment. [`ReferenceData`]
//! turns them into lookup maps once; commune multipliers can then be
//! overridden (for example from a CSV file) before any calculation runs.

pub mod rules;
pub mod scales;

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    BracketTable, BracketTableError, Canton, CantonTaxRule, ChurchTaxRule, CommuneTaxRule,
    Confession,
};

/// Every progressive scale the strategies evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scales {
    pub federal: BracketTable,
    pub geneva_income: BracketTable,
    pub geneva_wealth: BracketTable,
    pub vaud_income: BracketTable,
    pub vaud_wealth: BracketTable,
    pub romandie_standard: BracketTable,
    pub romandie_high_coefficient: BracketTable,
}

impl Scales {
    pub fn builtin() -> Result<Self, BracketTableError> {
        Ok(Self {
            federal: BracketTable::from_rates(&scales::FEDERAL_INCOME)?,
            geneva_income: BracketTable::from_rates(&scales::GENEVA_INCOME)?,
            geneva_wealth: BracketTable::from_rates(&scales::GENEVA_WEALTH)?,
            vaud_income: BracketTable::from_rates(&scales::VAUD_INCOME)?,
            vaud_wealth: BracketTable::from_rates(&scales::VAUD_WEALTH)?,
            romandie_standard: BracketTable::from_rates(&scales::ROMANDIE_STANDARD)?,
            romandie_high_coefficient: BracketTable::from_rates(
                &scales::ROMANDIE_HIGH_COEFFICIENT,
            )?,
        })
    }
}

/// Lookup tables consumed by the tax calculator.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    scales: Scales,
    canton_rules: HashMap<Canton, CantonTaxRule>,
    communes: HashMap<Canton, Vec<CommuneTaxRule>>,
    church_rates: HashMap<(Canton, Confession), Decimal>,
}

impl ReferenceData {
    /// Builds the reference data from the literal tables shipped with the crate.
    pub fn builtin() -> Result<Self, BracketTableError> {
        let canton_rules = rules::CANTON_RULES
            .iter()
            .map(|&(canton, strategy, cantonal_multiplier, child_deduction, scale)| {
                (
                    canton,
                    CantonTaxRule {
                        canton,
                        strategy,
                        cantonal_multiplier,
                        child_deduction,
                        scale,
                    },
                )
            })
            .collect();

        let mut data = Self {
            scales: Scales::builtin()?,
            canton_rules,
            communes: HashMap::new(),
            church_rates: HashMap::new(),
        };

        for &(canton, commune, multiplier) in rules::COMMUNES {
            data.upsert_commune(CommuneTaxRule {
                canton,
                commune: commune.to_string(),
                multiplier,
            });
        }
        for &(canton, confession, rate) in rules::CHURCH_RATES {
            data.upsert_church_rate(ChurchTaxRule {
                canton,
                confession,
                rate,
            });
        }

        Ok(data)
    }

    pub fn scales(&self) -> &Scales {
        &self.scales
    }

    /// Rule for `canton`, or the generic rule when the canton has no entry.
    pub fn canton_rule(
        &self,
        canton: Canton,
    ) -> CantonTaxRule {
        self.canton_rules
            .get(&canton)
            .cloned()
            .unwrap_or_else(|| CantonTaxRule::generic(canton))
    }

    /// Communes of `canton`, in insertion order.
    pub fn communes(
        &self,
        canton: Canton,
    ) -> &[CommuneTaxRule] {
        self.communes
            .get(&canton)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Looks up a commune by name within its canton, ignoring case.
    pub fn commune(
        &self,
        canton: Canton,
        name: &str,
    ) -> Option<&CommuneTaxRule> {
        let name = name.trim();
        self.communes(canton)
            .iter()
            .find(|rule| rule.commune.to_lowercase() == name.to_lowercase())
    }

    /// Ecclesiastical rate for the pair, zero when the canton has no entry.
    pub fn church_rate(
        &self,
        canton: Canton,
        confession: Confession,
    ) -> Decimal {
        if confession == Confession::None {
            return Decimal::ZERO;
        }
        self.church_rates
            .get(&(canton, confession))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Inserts a commune, replacing the multiplier of an existing one.
    pub fn upsert_commune(
        &mut self,
        rule: CommuneTaxRule,
    ) {
        let communes = self.communes.entry(rule.canton).or_default();
        match communes
            .iter_mut()
            .find(|existing| existing.commune.to_lowercase() == rule.commune.to_lowercase())
        {
            Some(existing) => existing.multiplier = rule.multiplier,
            None => communes.push(rule),
        }
    }

    pub fn upsert_church_rate(
        &mut self,
        rule: ChurchTaxRule,
    ) {
        self.church_rates
            .insert((rule.canton, rule.confession), rule.rate);
    }
}
