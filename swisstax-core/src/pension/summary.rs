//! Combined pension picture across the three pillars.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::percentage_of;
use crate::models::{Annuity, ProfileId};
use crate::pension::{AvsProjection, LppProjection, ThirdPillarProjection};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionSummary {
    pub owner: ProfileId,
    pub avs: Option<AvsProjection>,
    pub lpp: Vec<LppProjection>,
    pub third_pillar: Vec<ThirdPillarProjection>,
    /// Old-age income from all pillars.
    pub retirement: Annuity,
    /// Second- and third-pillar capital available at retirement.
    pub capital_at_retirement: Decimal,
    pub disability: Annuity,
    /// Spouse or widow pensions from the first and second pillar.
    pub survivors: Annuity,
    pub death_capital: Decimal,
    /// Retirement income as a percentage of the current income.
    pub replacement_ratio: Decimal,
}

/// Adds up the projections of one person.
pub fn summarize(
    owner: ProfileId,
    avs: Option<AvsProjection>,
    lpp: Vec<LppProjection>,
    third_pillar: Vec<ThirdPillarProjection>,
    current_income: Decimal,
) -> PensionSummary {
    let retirement = avs.iter().map(|a| a.old_age).sum::<Annuity>()
        + lpp.iter().map(|p| p.retirement).sum::<Annuity>()
        + third_pillar.iter().map(|p| p.retirement).sum::<Annuity>();

    let disability = avs.iter().map(|a| a.disability).sum::<Annuity>()
        + lpp.iter().map(|p| p.disability).sum::<Annuity>()
        + third_pillar.iter().map(|p| p.disability).sum::<Annuity>();

    let survivors =
        avs.iter().map(|a| a.widow).sum::<Annuity>() + lpp.iter().map(|p| p.spouse).sum::<Annuity>();

    let capital_at_retirement = lpp.iter().map(|p| p.capital_at_retirement).sum::<Decimal>()
        + third_pillar
            .iter()
            .map(|p| p.capital_at_retirement)
            .sum::<Decimal>();

    let death_capital = lpp.iter().map(|p| p.death_capital).sum::<Decimal>()
        + third_pillar.iter().map(|p| p.death_capital).sum::<Decimal>();

    PensionSummary {
        owner,
        replacement_ratio: percentage_of(retirement.annual(), current_income),
        avs,
        lpp,
        third_pillar,
        retirement,
        capital_at_retirement,
        disability,
        survivors,
        death_capital,
    }
}
