//! Full income and wealth tax pipeline for one profile.
//!
//! The calculator chains the pieces in a fixed order:
//!
//! 1. taxable income and wealth from the profile (clamped at zero)
//! 2. federal tax from the nationwide scale
//! 3. cantonal and communal tax from the canton's strategy
//! 4. ecclesiastical tax as a share of the cantonal tax
//!
//! Each component is rounded to the centime before the total is summed, so
//! `total_tax` always equals the sum of the displayed parts.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use swisstax_core::calculations::TaxCalculator;
//! use swisstax_core::models::{Canton, CivilStatus, Confession, Deductions, TaxProfile};
//! use swisstax_core::reference::ReferenceData;
//!
//! let reference = ReferenceData::builtin().unwrap();
//! let calculator = TaxCalculator::new(&reference);
//!
//! let profile = TaxProfile {
//!     canton: Canton::Geneva,
//!     commune: "Genève".to_string(),
//!     civil_status: CivilStatus::Single,
//!     confession: Confession::None,
//!     gross_income: dec!(80000),
//!     net_wealth: dec!(0),
//!     children: 0,
//!     deductions: Deductions::default(),
//! };
//!
//! let result = calculator.calculate(&profile).unwrap();
//! assert_eq!(result.cantonal_tax, dec!(10910.22));
//! assert_eq!(result.communal_tax, dec!(3786.60));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{percentage_of, round_half_up};
use crate::calculations::federal::federal_tax;
use crate::calculations::strategies::{StrategyInput, cantonal_tax};
use crate::models::{Canton, TaxProfile, TaxResult};
use crate::reference::ReferenceData;

/// Errors surfaced by the typed tax entry points.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxError {
    /// The commune is not listed for the profile's canton.
    #[error("unknown commune {commune:?} in canton {canton}")]
    UnknownCommune { canton: Canton, commune: String },
}

/// Runs the tax pipeline against a set of reference tables.
#[derive(Debug, Clone, Copy)]
pub struct TaxCalculator<'a> {
    reference: &'a ReferenceData,
}

impl<'a> TaxCalculator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Computes every tax component for `profile`.
    ///
    /// # Errors
    ///
    /// Returns [`TaxError::UnknownCommune`] when the commune does not belong
    /// to the profile's canton.
    pub fn calculate(
        &self,
        profile: &TaxProfile,
    ) -> Result<TaxResult, TaxError> {
        let commune = self
            .reference
            .commune(profile.canton, &profile.commune)
            .ok_or_else(|| TaxError::UnknownCommune {
                canton: profile.canton,
                commune: profile.commune.clone(),
            })?;

        let taxable_income = profile.taxable_income();
        let taxable_wealth = profile.taxable_wealth();
        let scales = self.reference.scales();

        let federal = round_half_up(federal_tax(taxable_income, &scales.federal));

        let rule = self.reference.canton_rule(profile.canton);
        let input = StrategyInput {
            taxable_income,
            taxable_wealth,
            civil_status: profile.civil_status,
            children: profile.children,
            commune_multiplier: commune.multiplier,
        };
        let canton_share = cantonal_tax(&rule, &input, scales);
        let cantonal = round_half_up(canton_share.cantonal);
        let communal = round_half_up(canton_share.communal);

        let church_rate = self
            .reference
            .church_rate(profile.canton, profile.confession);
        let ecclesiastical = round_half_up(cantonal * church_rate);

        let total = federal + cantonal + communal + ecclesiastical;
        debug!(
            canton = %profile.canton,
            commune = %commune.commune,
            %taxable_income,
            %total,
            "computed tax"
        );

        Ok(TaxResult {
            canton: Some(profile.canton),
            commune: Some(commune.commune.clone()),
            taxable_income,
            taxable_wealth,
            federal_tax: federal,
            cantonal_tax: cantonal,
            communal_tax: communal,
            ecclesiastical_tax: ecclesiastical,
            total_tax: total,
            effective_rate: percentage_of(total, taxable_income),
        })
    }

    /// Lenient variant: a missing profile or an unknown commune yields
    /// [`TaxResult::zero`] instead of an error.
    pub fn calculate_or_zero(
        &self,
        profile: Option<&TaxProfile>,
    ) -> TaxResult {
        let Some(profile) = profile else {
            return TaxResult::zero();
        };

        match self.calculate(profile) {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "tax calculation skipped, returning zero result");
                TaxResult::zero()
            }
        }
    }

    /// Tax saved by the pillar 3a deduction.
    ///
    /// Runs the whole pipeline twice, once without the deduction, and
    /// returns the difference of the totals.
    pub fn third_pillar_savings(
        &self,
        profile: &TaxProfile,
    ) -> Result<Decimal, TaxError> {
        let with_deduction = self.calculate(profile)?;
        let without_deduction = self.calculate(&profile.without_third_pillar())?;

        Ok(without_deduction.total_tax - with_deduction.total_tax)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{CivilStatus, Confession, Deductions};

    fn reference() -> ReferenceData {
        ReferenceData::builtin().unwrap()
    }

    fn profile(
        canton: Canton,
        commune: &str,
        income: Decimal,
    ) -> TaxProfile {
        TaxProfile {
            canton,
            commune: commune.to_string(),
            civil_status: CivilStatus::Single,
            confession: Confession::None,
            gross_income: income,
            net_wealth: Decimal::ZERO,
            children: 0,
            deductions: Deductions::default(),
        }
    }

    #[test]
    fn geneva_single_eighty_thousand() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        let result = calculator
            .calculate(&profile(Canton::Geneva, "Genève", dec!(80000)))
            .unwrap();

        assert_eq!(result.federal_tax, dec!(1355.86));
        assert_eq!(result.cantonal_tax, dec!(10910.22));
        assert_eq!(result.communal_tax, dec!(3786.60));
        assert_eq!(result.ecclesiastical_tax, dec!(0));
        assert_eq!(result.total_tax, dec!(16052.68));
        assert_eq!(result.effective_rate, dec!(20.07));
        assert_eq!(result.commune.as_deref(), Some("Genève"));
    }

    #[test]
    fn total_is_sum_of_rounded_components() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);
        let mut p = profile(Canton::Bern, "Thun", dec!(123456.78));
        p.confession = Confession::Catholic;
        p.net_wealth = dec!(345678.9);

        let r = calculator.calculate(&p).unwrap();

        assert_eq!(
            r.total_tax,
            r.federal_tax + r.cantonal_tax + r.communal_tax + r.ecclesiastical_tax
        );
        assert_eq!(r.ecclesiastical_tax, round_half_up(r.cantonal_tax * dec!(0.0684)));
    }

    #[test]
    fn zero_income_and_wealth_owes_nothing() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        for canton in Canton::ALL {
            let commune = reference.communes(canton)[0].commune.clone();
            let result = calculator
                .calculate(&profile(canton, &commune, dec!(0)))
                .unwrap();

            assert_eq!(result.total_tax, dec!(0), "{canton}");
            assert_eq!(result.effective_rate, dec!(0), "{canton}");
        }
    }

    #[test]
    fn federal_tax_does_not_depend_on_canton() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);
        let expected = calculator
            .calculate(&profile(Canton::Geneva, "Genève", dec!(95000)))
            .unwrap()
            .federal_tax;

        for canton in Canton::ALL {
            let commune = reference.communes(canton)[0].commune.clone();
            let result = calculator
                .calculate(&profile(canton, &commune, dec!(95000)))
                .unwrap();

            assert_eq!(result.federal_tax, expected, "{canton}");
        }
    }

    #[test]
    fn commune_changes_only_communal_tax() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        let lausanne = calculator
            .calculate(&profile(Canton::Vaud, "Lausanne", dec!(110000)))
            .unwrap();
        let nyon = calculator
            .calculate(&profile(Canton::Vaud, "Nyon", dec!(110000)))
            .unwrap();

        assert_eq!(lausanne.federal_tax, nyon.federal_tax);
        assert_eq!(lausanne.cantonal_tax, nyon.cantonal_tax);
        assert!(lausanne.communal_tax > nyon.communal_tax);
    }

    #[test]
    fn unknown_commune_is_an_error() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        let err = calculator
            .calculate(&profile(Canton::Vaud, "Carouge", dec!(80000)))
            .unwrap_err();

        assert_eq!(
            err,
            TaxError::UnknownCommune {
                canton: Canton::Vaud,
                commune: "Carouge".to_string(),
            }
        );
    }

    #[test]
    fn lenient_entry_point_returns_zero_result() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        assert_eq!(calculator.calculate_or_zero(None), TaxResult::zero());
        assert_eq!(
            calculator.calculate_or_zero(Some(&profile(Canton::Vaud, "Nowhere", dec!(80000)))),
            TaxResult::zero()
        );
    }

    #[test]
    fn third_pillar_savings_is_positive_with_deduction() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);
        let mut p = profile(Canton::Geneva, "Genève", dec!(100000));
        p.deductions.third_pillar = dec!(7056);

        let savings = calculator.third_pillar_savings(&p).unwrap();
        let with = calculator.calculate(&p).unwrap().total_tax;
        let without = calculator
            .calculate(&p.without_third_pillar())
            .unwrap()
            .total_tax;

        assert!(savings > dec!(0));
        assert_eq!(savings, without - with);
    }

    #[test]
    fn third_pillar_savings_is_zero_without_deduction() {
        let reference = reference();
        let calculator = TaxCalculator::new(&reference);

        let savings = calculator
            .third_pillar_savings(&profile(Canton::Zurich, "Zürich", dec!(90000)))
            .unwrap();

        assert_eq!(savings, dec!(0));
    }
}
