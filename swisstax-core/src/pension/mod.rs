//! Pension projections for the three Swiss pillars.
//!
//! - [`avs`]: first pillar, state old-age and survivors' insurance
//! - [`lpp`]: second pillar, occupational pension funds
//! - [`third_pillar`]: private 3a/3b savings
//! - [`summary`]: the combined picture across all pillars

pub mod avs;
pub mod lpp;
pub mod summary;
pub mod third_pillar;

use rust_decimal::Decimal;
use thiserror::Error;

pub use avs::{
    AvsParameters, AvsProjection, couple_cap, determinant_income, project_avs, project_couple,
};
pub use lpp::{
    LppParameters, LppProjection, project_capital, project_lpp, years_to_retirement,
};
pub use summary::{PensionSummary, summarize};
pub use third_pillar::{ThirdPillarProjection, project_third_pillar};

/// Errors raised by the pension projections on out-of-domain inputs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PensionError {
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    #[error("{field} must be between 0 and 1, got {value}")]
    RateOutOfRange { field: &'static str, value: Decimal },

    #[error("{field} is too large to be represented")]
    Overflow { field: &'static str },
}

pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, PensionError> {
    if value < Decimal::ZERO {
        return Err(PensionError::NegativeAmount { field, value });
    }
    Ok(value)
}

pub(crate) fn ensure_rate(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, PensionError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(PensionError::RateOutOfRange { field, value });
    }
    Ok(value)
}
