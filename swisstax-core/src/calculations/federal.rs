//! Federal direct tax.

use rust_decimal::Decimal;

use crate::calculations::brackets::progressive_tax;
use crate::calculations::common::non_negative;
use crate::models::BracketTable;
use crate::reference::scales::FEDERAL_MAX_AVERAGE_RATE;

/// Federal tax on `taxable_income`, capped at the maximum average rate.
///
/// The same scale applies in every canton and for every civil status.
pub fn federal_tax(
    taxable_income: Decimal,
    scale: &BracketTable,
) -> Decimal {
    let income = non_negative(taxable_income);
    let scaled = progressive_tax(income, scale);
    let cap = income * FEDERAL_MAX_AVERAGE_RATE;

    if scaled > cap { cap } else { scaled }
}
