//! Cantonal and communal tax strategies.
//!
//! Each canton maps to one [`TaxStrategy`] through its [`CantonTaxRule`].
//! A strategy turns the taxable income and wealth into a *base* tax, then
//! scales it by the cantonal and communal multipliers:
//!
//! | Strategy           | Rate-determining income                 | Cantonal             |
//! |--------------------|-----------------------------------------|----------------------|
//! | Geneva             | income × splitting factor               | base × 1.475 × 0.88 × 1.01 |
//! | Vaud               | ⌊income ÷ quotient familial⌋₁₀₀         | base × 1.55          |
//! | Romandie-standard  | income − child deductions               | base × canton multiplier |
//! | Generic            | flat 6.5 % of income, 0.2 % of wealth    | × canton multiplier  |
//!
//! The communal tax is always the base times the commune multiplier.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::calculations::brackets::{average_rate, progressive_tax};
use crate::calculations::common::{floor_to_hundred, non_negative};
use crate::models::{CantonTaxRule, CantonalTax, CivilStatus, ScaleKind, TaxStrategy};
use crate::reference::Scales;
use crate::reference::scales::{
    GENERIC_CANTONAL_INCOME_RATE, GENERIC_CANTONAL_WEALTH_RATE, GENERIC_COMMUNAL_INCOME_RATE,
    GENERIC_COMMUNAL_WEALTH_RATE, GENEVA_CENTIMES_ADDITIONNELS, GENEVA_HOME_CARE_FACTOR,
    GENEVA_REBATE_FACTOR, GENEVA_WEALTH_EXEMPTION_ADULT, GENEVA_WEALTH_EXEMPTION_CHILD,
    ROMANDIE_FAMILY_FACTOR, ROMANDIE_WEALTH_EXEMPTION, ROMANDIE_WEALTH_RATE,
};

/// Inputs shared by every strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyInput {
    pub taxable_income: Decimal,
    pub taxable_wealth: Decimal,
    pub civil_status: CivilStatus,
    pub children: u32,
    pub commune_multiplier: Decimal,
}

/// Computes the cantonal and communal tax for `input` under `rule`.
pub fn cantonal_tax(
    rule: &CantonTaxRule,
    input: &StrategyInput,
    scales: &Scales,
) -> CantonalTax {
    debug!(canton = %rule.canton, strategy = ?rule.strategy, "evaluating canton strategy");

    match rule.strategy {
        TaxStrategy::Geneva => geneva(input, scales),
        TaxStrategy::VaudSplitting => vaud(rule, input, scales),
        TaxStrategy::RomandieStandard => romandie(rule, input, scales),
        TaxStrategy::Generic => generic(rule, input),
    }
}

/// Share of income that sets the Geneva rate.
pub fn geneva_splitting_factor(status: CivilStatus) -> Decimal {
    match status {
        CivilStatus::Single => Decimal::ONE,
        CivilStatus::Married => dec!(0.5),
        CivilStatus::SingleParent => dec!(0.5556),
    }
}

/// Vaud quotient familial: household parts dividing the income.
pub fn vaud_quotient(
    status: CivilStatus,
    children: u32,
) -> Decimal {
    let adults = match status {
        CivilStatus::Single => Decimal::ONE,
        CivilStatus::Married => dec!(1.8),
        CivilStatus::SingleParent => dec!(1.3),
    };
    adults + dec!(0.5) * Decimal::from(children)
}

/// Geneva base tax on income: the average rate at the split income,
/// applied to the full income.
fn geneva_income_base(
    income: Decimal,
    status: CivilStatus,
    scales: &Scales,
) -> Decimal {
    let factor = geneva_splitting_factor(status);
    if factor == Decimal::ONE {
        return progressive_tax(income, &scales.geneva_income);
    }
    let rate_income = income * factor;
    average_rate(rate_income, &scales.geneva_income) * income
}

fn geneva(
    input: &StrategyInput,
    scales: &Scales,
) -> CantonalTax {
    let income_base =
        geneva_income_base(input.taxable_income, input.civil_status, scales);

    let exemption = GENEVA_WEALTH_EXEMPTION_ADULT * Decimal::from(input.civil_status.adults())
        + GENEVA_WEALTH_EXEMPTION_CHILD * Decimal::from(input.children);
    let wealth_base = progressive_tax(
        non_negative(input.taxable_wealth - exemption),
        &scales.geneva_wealth,
    );

    let base = income_base + wealth_base;
    CantonalTax {
        cantonal: base
            * GENEVA_CENTIMES_ADDITIONNELS
            * GENEVA_REBATE_FACTOR
            * GENEVA_HOME_CARE_FACTOR,
        communal: base * input.commune_multiplier,
    }
}

fn vaud(
    rule: &CantonTaxRule,
    input: &StrategyInput,
    scales: &Scales,
) -> CantonalTax {
    let quotient = vaud_quotient(input.civil_status, input.children);
    let rate_income = floor_to_hundred(input.taxable_income / quotient);
    let income_base = progressive_tax(rate_income, &scales.vaud_income) * quotient;
    let wealth_base = progressive_tax(input.taxable_wealth, &scales.vaud_wealth);

    let base = income_base + wealth_base;
    CantonalTax {
        cantonal: base * rule.cantonal_multiplier,
        communal: base * input.commune_multiplier,
    }
}

fn romandie(
    rule: &CantonTaxRule,
    input: &StrategyInput,
    scales: &Scales,
) -> CantonalTax {
    let income =
        non_negative(input.taxable_income - rule.child_deduction * Decimal::from(input.children));
    let table = match rule.scale {
        ScaleKind::Standard => &scales.romandie_standard,
        ScaleKind::HighCoefficient => &scales.romandie_high_coefficient,
    };

    let mut income_base = progressive_tax(income, table);
    if input.civil_status.has_family_relief() {
        income_base *= ROMANDIE_FAMILY_FACTOR;
    }
    let wealth_base =
        non_negative(input.taxable_wealth - ROMANDIE_WEALTH_EXEMPTION) * ROMANDIE_WEALTH_RATE;

    let base = income_base + wealth_base;
    CantonalTax {
        cantonal: base * rule.cantonal_multiplier,
        communal: base * input.commune_multiplier,
    }
}

fn generic(
    rule: &CantonTaxRule,
    input: &StrategyInput,
) -> CantonalTax {
    let cantonal = input.taxable_income * GENERIC_CANTONAL_INCOME_RATE
        + input.taxable_wealth * GENERIC_CANTONAL_WEALTH_RATE;
    let communal = input.taxable_income * GENERIC_COMMUNAL_INCOME_RATE
        + input.taxable_wealth * GENERIC_COMMUNAL_WEALTH_RATE;

    CantonalTax {
        cantonal: cantonal * rule.cantonal_multiplier,
        communal: communal * input.commune_multiplier,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Canton;
    use crate::reference::ReferenceData;

    fn data() -> ReferenceData {
        ReferenceData::builtin().unwrap()
    }

    fn input(
        income: Decimal,
        status: CivilStatus,
        children: u32,
        commune_multiplier: Decimal,
    ) -> StrategyInput {
        StrategyInput {
            taxable_income: income,
            taxable_wealth: Decimal::ZERO,
            civil_status: status,
            children,
            commune_multiplier,
        }
    }

    // =========================================================================
    // Geneva
    // =========================================================================

    #[test]
    fn geneva_single_eighty_thousand_scenario() {
        let data = data();
        let rule = data.canton_rule(Canton::Geneva);

        let tax = cantonal_tax(
            &rule,
            &input(dec!(80000), CivilStatus::Single, 0, dec!(0.455)),
            data.scales(),
        );

        // base 8322.19 → × 1.475 × 0.88 × 1.01
        assert_eq!(tax.cantonal, dec!(10910.2246462));
        assert_eq!(tax.communal, dec!(3786.59645));
    }

    #[test]
    fn geneva_married_pays_less_than_single() {
        let data = data();
        let rule = data.canton_rule(Canton::Geneva);

        for income in [dec!(30000), dec!(80000), dec!(150000), dec!(500000), dec!(1000000)] {
            let single = cantonal_tax(
                &rule,
                &input(income, CivilStatus::Single, 0, dec!(0.455)),
                data.scales(),
            );
            let married = cantonal_tax(
                &rule,
                &input(income, CivilStatus::Married, 0, dec!(0.455)),
                data.scales(),
            );

            assert!(married.cantonal <= single.cantonal, "income {income}");
        }
    }

    #[test]
    fn geneva_single_parent_sits_between_single_and_married() {
        let data = data();
        let rule = data.canton_rule(Canton::Geneva);
        let tax_for = |status| {
            cantonal_tax(&rule, &input(dec!(120000), status, 1, dec!(0.455)), data.scales())
                .cantonal
        };

        let single = tax_for(CivilStatus::Single);
        let parent = tax_for(CivilStatus::SingleParent);
        let married = tax_for(CivilStatus::Married);

        assert!(married <= parent && parent <= single);
    }

    #[test]
    fn geneva_wealth_below_exemption_is_untaxed() {
        let data = data();
        let rule = data.canton_rule(Canton::Geneva);
        let mut with_wealth = input(dec!(0), CivilStatus::Single, 0, dec!(0.455));
        with_wealth.taxable_wealth = dec!(80000);

        let tax = cantonal_tax(&rule, &with_wealth, data.scales());

        assert_eq!(tax, CantonalTax::default());
    }

    // =========================================================================
    // Vaud
    // =========================================================================

    #[test]
    fn vaud_quotient_for_married_with_two_children() {
        assert_eq!(vaud_quotient(CivilStatus::Married, 2), dec!(2.8));
        assert_eq!(vaud_quotient(CivilStatus::SingleParent, 1), dec!(1.8));
        assert_eq!(vaud_quotient(CivilStatus::Single, 0), dec!(1));
    }

    #[test]
    fn vaud_married_two_children_floors_rate_income_to_hundred() {
        let data = data();
        let rule = data.canton_rule(Canton::Vaud);

        let tax = cantonal_tax(
            &rule,
            &input(dec!(100000), CivilStatus::Married, 2, dec!(0.785)),
            data.scales(),
        );

        // 100000 / 2.8 = 35714.28 → 35700
        let per_part = progressive_tax(dec!(35700), &data.scales().vaud_income);
        let base = per_part * dec!(2.8);
        assert_eq!(tax.cantonal, base * dec!(1.55));
        assert_eq!(tax.communal, base * dec!(0.785));
    }

    #[test]
    fn vaud_income_within_same_hundred_yields_same_tax() {
        let data = data();
        let rule = data.canton_rule(Canton::Vaud);
        let tax_for = |income| {
            cantonal_tax(&rule, &input(income, CivilStatus::Single, 0, dec!(0.785)), data.scales())
        };

        assert_eq!(tax_for(dec!(60010)), tax_for(dec!(60099)));
    }

    // =========================================================================
    // Romandie-standard
    // =========================================================================

    #[test]
    fn romandie_deducts_children_before_scale() {
        let data = data();
        let rule = data.canton_rule(Canton::Fribourg);

        let with_children = cantonal_tax(
            &rule,
            &input(dec!(100000), CivilStatus::Single, 2, dec!(0.80)),
            data.scales(),
        );
        let base = progressive_tax(dec!(83000), &data.scales().romandie_standard);

        assert_eq!(with_children.cantonal, base);
        assert_eq!(with_children.communal, base * dec!(0.80));
    }

    #[test]
    fn romandie_applies_family_rebate() {
        let data = data();
        let rule = data.canton_rule(Canton::Valais);
        let tax_for = |status| {
            cantonal_tax(&rule, &input(dec!(90000), status, 0, dec!(1.10)), data.scales())
        };

        let single = tax_for(CivilStatus::Single);
        let married = tax_for(CivilStatus::Married);

        assert_eq!(married.cantonal, single.cantonal * dec!(0.70));
    }

    #[test]
    fn romandie_high_coefficient_scale_for_bern() {
        let data = data();
        let rule = data.canton_rule(Canton::Bern);

        let tax = cantonal_tax(
            &rule,
            &input(dec!(80000), CivilStatus::Single, 0, dec!(1.54)),
            data.scales(),
        );
        let base = progressive_tax(dec!(80000), &data.scales().romandie_high_coefficient);

        assert_eq!(tax.cantonal, base * dec!(3.025));
    }

    #[test]
    fn romandie_wealth_tax_above_exemption() {
        let data = data();
        let rule = data.canton_rule(Canton::Neuchatel);
        let mut wealthy = input(dec!(0), CivilStatus::Single, 0, dec!(0.65));
        wealthy.taxable_wealth = dec!(250000);

        let tax = cantonal_tax(&rule, &wealthy, data.scales());

        // (250000 - 50000) * 0.15 % = 300
        assert_eq!(tax.cantonal, dec!(375));
        assert_eq!(tax.communal, dec!(195));
    }

    // =========================================================================
    // Generic
    // =========================================================================

    #[test]
    fn generic_flat_rates_scaled_by_multipliers() {
        let data = data();
        let rule = data.canton_rule(Canton::Zurich);
        let mut zurich = input(dec!(100000), CivilStatus::Single, 0, dec!(1.19));
        zurich.taxable_wealth = dec!(200000);

        let tax = cantonal_tax(&rule, &zurich, data.scales());

        // (6500 + 400) * 0.98 and (2500 + 200) * 1.19
        assert_eq!(tax.cantonal, dec!(6762));
        assert_eq!(tax.communal, dec!(3213));
    }

    // =========================================================================
    // Cross-strategy properties
    // =========================================================================

    #[test]
    fn zero_income_and_wealth_owe_nothing_in_every_canton() {
        let data = data();

        for canton in Canton::ALL {
            let rule = data.canton_rule(canton);
            for status in [CivilStatus::Single, CivilStatus::Married, CivilStatus::SingleParent] {
                let tax = cantonal_tax(&rule, &input(dec!(0), status, 2, dec!(1)), data.scales());

                assert_eq!(tax, CantonalTax::default(), "{canton} {status:?}");
            }
        }
    }

    #[test]
    fn commune_multiplier_only_changes_communal_share() {
        let data = data();

        for canton in [Canton::Geneva, Canton::Vaud, Canton::Jura, Canton::Zug] {
            let rule = data.canton_rule(canton);
            let low = cantonal_tax(
                &rule,
                &input(dec!(95000), CivilStatus::Married, 1, dec!(0.4)),
                data.scales(),
            );
            let high = cantonal_tax(
                &rule,
                &input(dec!(95000), CivilStatus::Married, 1, dec!(1.2)),
                data.scales(),
            );

            assert_eq!(low.cantonal, high.cantonal, "{canton}");
            assert!(low.communal < high.communal, "{canton}");
        }
    }
}
