//! Literal progressive scales, as `(lower bound, marginal rate)` rows.
//!
//! Cumulative bases are not transcribed; [`BracketTable::from_rates`]
//! derives them when the reference data is built.
//!
//! [`BracketTable::from_rates`]: crate::models::BracketTable::from_rates

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Federal direct tax (IFD), one nationwide scale.
pub const FEDERAL_INCOME: [(Decimal, Decimal); 11] = [
    (dec!(0), dec!(0)),
    (dec!(18500), dec!(0.0077)),
    (dec!(33200), dec!(0.0088)),
    (dec!(43500), dec!(0.0264)),
    (dec!(58000), dec!(0.0297)),
    (dec!(76100), dec!(0.0594)),
    (dec!(82000), dec!(0.0660)),
    (dec!(108800), dec!(0.0880)),
    (dec!(141500), dec!(0.1100)),
    (dec!(184900), dec!(0.1320)),
    (dec!(793400), dec!(0.1150)),
];

/// Federal tax never exceeds this share of taxable income.
pub const FEDERAL_MAX_AVERAGE_RATE: Decimal = dec!(0.115);

/// Geneva income tax base scale (LIPP art. 41).
pub const GENEVA_INCOME: [(Decimal, Decimal); 18] = [
    (dec!(0), dec!(0)),
    (dec!(18480), dec!(0.08)),
    (dec!(22265), dec!(0.09)),
    (dec!(24492), dec!(0.10)),
    (dec!(26718), dec!(0.11)),
    (dec!(28944), dec!(0.12)),
    (dec!(34510), dec!(0.13)),
    (dec!(38963), dec!(0.14)),
    (dec!(43417), dec!(0.145)),
    (dec!(47869), dec!(0.15)),
    (dec!(76812), dec!(0.155)),
    (dec!(125794), dec!(0.16)),
    (dec!(169209), dec!(0.165)),
    (dec!(191474), dec!(0.17)),
    (dec!(273851), dec!(0.175)),
    (dec!(291662), dec!(0.18)),
    (dec!(410776), dec!(0.185)),
    (dec!(643423), dec!(0.19)),
];

/// Geneva wealth tax base scale, applied after the personal exemptions.
pub const GENEVA_WEALTH: [(Decimal, Decimal); 8] = [
    (dec!(0), dec!(0.00175)),
    (dec!(111059), dec!(0.00225)),
    (dec!(222118), dec!(0.00275)),
    (dec!(388707), dec!(0.003)),
    (dec!(610826), dec!(0.00325)),
    (dec!(888475), dec!(0.0035)),
    (dec!(1277184), dec!(0.00375)),
    (dec!(1832482), dec!(0.0045)),
];

/// Geneva wealth exemption per adult.
pub const GENEVA_WEALTH_EXEMPTION_ADULT: Decimal = dec!(86833);

/// Geneva wealth exemption per dependent child.
pub const GENEVA_WEALTH_EXEMPTION_CHILD: Decimal = dec!(43417);

/// Vaud income tax base scale, evaluated on the quotient-familial income.
pub const VAUD_INCOME: [(Decimal, Decimal); 13] = [
    (dec!(0), dec!(0)),
    (dec!(1600), dec!(0.01)),
    (dec!(4000), dec!(0.02)),
    (dec!(8000), dec!(0.03)),
    (dec!(15000), dec!(0.045)),
    (dec!(25000), dec!(0.06)),
    (dec!(35000), dec!(0.075)),
    (dec!(50000), dec!(0.09)),
    (dec!(70000), dec!(0.105)),
    (dec!(100000), dec!(0.12)),
    (dec!(150000), dec!(0.135)),
    (dec!(250000), dec!(0.145)),
    (dec!(500000), dec!(0.155)),
];

/// Vaud wealth tax base scale.
pub const VAUD_WEALTH: [(Decimal, Decimal); 7] = [
    (dec!(0), dec!(0)),
    (dec!(50000), dec!(0.001)),
    (dec!(100000), dec!(0.0015)),
    (dec!(200000), dec!(0.002)),
    (dec!(400000), dec!(0.0025)),
    (dec!(800000), dec!(0.003)),
    (dec!(1600000), dec!(0.00339)),
];

/// Shared simple-tax scale for VS, FR and NE.
pub const ROMANDIE_STANDARD: [(Decimal, Decimal); 10] = [
    (dec!(0), dec!(0)),
    (dec!(8000), dec!(0.01)),
    (dec!(15000), dec!(0.03)),
    (dec!(25000), dec!(0.05)),
    (dec!(40000), dec!(0.07)),
    (dec!(60000), dec!(0.09)),
    (dec!(80000), dec!(0.105)),
    (dec!(110000), dec!(0.12)),
    (dec!(150000), dec!(0.13)),
    (dec!(250000), dec!(0.14)),
];

/// Simple-tax scale for BE and JU, whose cantonal multipliers are around 3.
pub const ROMANDIE_HIGH_COEFFICIENT: [(Decimal, Decimal); 10] = [
    (dec!(0), dec!(0)),
    (dec!(5000), dec!(0.005)),
    (dec!(10000), dec!(0.01)),
    (dec!(20000), dec!(0.015)),
    (dec!(35000), dec!(0.02)),
    (dec!(50000), dec!(0.025)),
    (dec!(70000), dec!(0.03)),
    (dec!(100000), dec!(0.035)),
    (dec!(150000), dec!(0.04)),
    (dec!(250000), dec!(0.045)),
];

/// Romandie flat wealth tax rate and exemption.
pub const ROMANDIE_WEALTH_RATE: Decimal = dec!(0.0015);
pub const ROMANDIE_WEALTH_EXEMPTION: Decimal = dec!(50000);

/// Rebate on the Romandie simple income tax for married and single-parent filers.
pub const ROMANDIE_FAMILY_FACTOR: Decimal = dec!(0.70);

/// Geneva supplements chained onto the base tax.
pub const GENEVA_CENTIMES_ADDITIONNELS: Decimal = dec!(1.475);
pub const GENEVA_REBATE_FACTOR: Decimal = dec!(0.88);
pub const GENEVA_HOME_CARE_FACTOR: Decimal = dec!(1.01);

/// Flat approximation for cantons without a dedicated scale.
pub const GENERIC_CANTONAL_INCOME_RATE: Decimal = dec!(0.065);
pub const GENERIC_CANTONAL_WEALTH_RATE: Decimal = dec!(0.002);
pub const GENERIC_COMMUNAL_INCOME_RATE: Decimal = dec!(0.025);
pub const GENERIC_COMMUNAL_WEALTH_RATE: Decimal = dec!(0.001);
