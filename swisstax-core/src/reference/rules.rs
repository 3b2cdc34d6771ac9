//! Canton, commune and church tables for the current tax year.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{Canton, Confession, ScaleKind, TaxStrategy};

/// `(canton, strategy, cantonal multiplier, child deduction, scale)`.
///
/// Cantons missing here fall back to the generic strategy at multiplier 1.0.
pub const CANTON_RULES: &[(Canton, TaxStrategy, Decimal, Decimal, ScaleKind)] = &[
    (Canton::Geneva, TaxStrategy::Geneva, dec!(1), dec!(0), ScaleKind::Standard),
    (Canton::Vaud, TaxStrategy::VaudSplitting, dec!(1.55), dec!(0), ScaleKind::Standard),
    (Canton::Valais, TaxStrategy::RomandieStandard, dec!(1), dec!(7510), ScaleKind::Standard),
    (Canton::Fribourg, TaxStrategy::RomandieStandard, dec!(1), dec!(8500), ScaleKind::Standard),
    (Canton::Neuchatel, TaxStrategy::RomandieStandard, dec!(1.25), dec!(6900), ScaleKind::Standard),
    (Canton::Jura, TaxStrategy::RomandieStandard, dec!(2.85), dec!(5300), ScaleKind::HighCoefficient),
    (Canton::Bern, TaxStrategy::RomandieStandard, dec!(3.025), dec!(8300), ScaleKind::HighCoefficient),
    (Canton::Zurich, TaxStrategy::Generic, dec!(0.98), dec!(0), ScaleKind::Standard),
    (Canton::Zug, TaxStrategy::Generic, dec!(0.82), dec!(0), ScaleKind::Standard),
    (Canton::Lucerne, TaxStrategy::Generic, dec!(1.6), dec!(0), ScaleKind::Standard),
    (Canton::BaselStadt, TaxStrategy::Generic, dec!(1), dec!(0), ScaleKind::Standard),
    (Canton::Ticino, TaxStrategy::Generic, dec!(0.97), dec!(0), ScaleKind::Standard),
    (Canton::Aargau, TaxStrategy::Generic, dec!(1.12), dec!(0), ScaleKind::Standard),
    (Canton::StGallen, TaxStrategy::Generic, dec!(1.05), dec!(0), ScaleKind::Standard),
];

/// `(canton, commune, communal multiplier)`.
pub const COMMUNES: &[(Canton, &str, Decimal)] = &[
    (Canton::Geneva, "Genève", dec!(0.455)),
    (Canton::Geneva, "Carouge", dec!(0.39)),
    (Canton::Geneva, "Lancy", dec!(0.48)),
    (Canton::Geneva, "Vernier", dec!(0.50)),
    (Canton::Geneva, "Meyrin", dec!(0.44)),
    (Canton::Geneva, "Onex", dec!(0.50)),
    (Canton::Geneva, "Cologny", dec!(0.26)),
    (Canton::Vaud, "Lausanne", dec!(0.785)),
    (Canton::Vaud, "Nyon", dec!(0.61)),
    (Canton::Vaud, "Montreux", dec!(0.655)),
    (Canton::Vaud, "Morges", dec!(0.68)),
    (Canton::Vaud, "Vevey", dec!(0.745)),
    (Canton::Vaud, "Yverdon-les-Bains", dec!(0.765)),
    (Canton::Valais, "Sion", dec!(1.10)),
    (Canton::Valais, "Martigny", dec!(1.15)),
    (Canton::Valais, "Monthey", dec!(1.10)),
    (Canton::Valais, "Sierre", dec!(1.20)),
    (Canton::Fribourg, "Fribourg", dec!(0.80)),
    (Canton::Fribourg, "Bulle", dec!(0.72)),
    (Canton::Fribourg, "Villars-sur-Glâne", dec!(0.63)),
    (Canton::Neuchatel, "Neuchâtel", dec!(0.65)),
    (Canton::Neuchatel, "La Chaux-de-Fonds", dec!(0.76)),
    (Canton::Neuchatel, "Le Locle", dec!(0.77)),
    (Canton::Jura, "Delémont", dec!(1.90)),
    (Canton::Jura, "Porrentruy", dec!(1.95)),
    (Canton::Bern, "Bern", dec!(1.54)),
    (Canton::Bern, "Biel/Bienne", dec!(1.63)),
    (Canton::Bern, "Thun", dec!(1.72)),
    (Canton::Zurich, "Zürich", dec!(1.19)),
    (Canton::Zurich, "Winterthur", dec!(1.25)),
    (Canton::Zug, "Zug", dec!(0.50)),
    (Canton::Lucerne, "Luzern", dec!(1.75)),
    (Canton::BaselStadt, "Basel", dec!(0)),
    (Canton::Ticino, "Lugano", dec!(0.80)),
    (Canton::Aargau, "Aarau", dec!(0.97)),
    (Canton::StGallen, "St. Gallen", dec!(1.38)),
    (Canton::AppenzellAusserrhoden, "Herisau", dec!(1)),
    (Canton::AppenzellInnerrhoden, "Appenzell", dec!(1)),
    (Canton::BaselLandschaft, "Liestal", dec!(1)),
    (Canton::Glarus, "Glarus", dec!(1)),
    (Canton::Graubunden, "Chur", dec!(1)),
    (Canton::Nidwalden, "Stans", dec!(1)),
    (Canton::Obwalden, "Sarnen", dec!(1)),
    (Canton::Schaffhausen, "Schaffhausen", dec!(1)),
    (Canton::Schwyz, "Schwyz", dec!(1)),
    (Canton::Solothurn, "Solothurn", dec!(1)),
    (Canton::Thurgau, "Frauenfeld", dec!(1)),
    (Canton::Uri, "Altdorf", dec!(1)),
];

/// `(canton, confession, share of cantonal tax)`.
pub const CHURCH_RATES: &[(Canton, Confession, Decimal)] = &[
    (Canton::Fribourg, Confession::Catholic, dec!(0.10)),
    (Canton::Fribourg, Confession::Protestant, dec!(0.09)),
    (Canton::Neuchatel, Confession::Catholic, dec!(0.09)),
    (Canton::Neuchatel, Confession::Protestant, dec!(0.09)),
    (Canton::Bern, Confession::Protestant, dec!(0.0608)),
    (Canton::Bern, Confession::Catholic, dec!(0.0684)),
    (Canton::Bern, Confession::ChristCatholic, dec!(0.0733)),
    (Canton::Jura, Confession::Catholic, dec!(0.0807)),
    (Canton::Jura, Confession::Protestant, dec!(0.0737)),
    (Canton::Zurich, Confession::Catholic, dec!(0.10)),
    (Canton::Zurich, Confession::Protestant, dec!(0.10)),
    (Canton::Zurich, Confession::ChristCatholic, dec!(0.14)),
    (Canton::Lucerne, Confession::Catholic, dec!(0.1563)),
    (Canton::Lucerne, Confession::Protestant, dec!(0.1563)),
];
