//! Commune multiplier overrides.
//!
//! The built-in commune table ships with the crate. A CSV with
//! `canton,commune,multiplier` rows updates existing communes or adds new
//! ones before any calculation runs.

use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use swisstax_core::{Canton, CommuneTaxRule, ReferenceData};
use tracing::info;

use crate::loader::{LoaderError, parse_records};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommuneRecord {
    pub canton: String,
    pub commune: String,
    pub multiplier: Decimal,
}

pub struct CommuneLoader;

impl CommuneLoader {
    pub fn parse<R: Read>(reader: R) -> Result<Vec<CommuneRecord>, LoaderError> {
        parse_records(reader)
    }

    /// Applies the overrides and returns how many rows were applied.
    ///
    /// Every row is checked first; nothing changes if one is invalid.
    pub fn apply(
        reference: &mut ReferenceData,
        records: &[CommuneRecord],
    ) -> Result<usize, LoaderError> {
        let mut rules = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let row = i + 2;
            let canton = Canton::parse(&record.canton).ok_or_else(|| LoaderError::InvalidField {
                row,
                field: "canton",
                value: record.canton.clone(),
            })?;
            if record.commune.trim().is_empty() {
                return Err(LoaderError::InvalidField {
                    row,
                    field: "commune",
                    value: record.commune.clone(),
                });
            }
            if record.multiplier < Decimal::ZERO {
                return Err(LoaderError::InvalidField {
                    row,
                    field: "multiplier",
                    value: record.multiplier.to_string(),
                });
            }
            rules.push(CommuneTaxRule {
                canton,
                commune: record.commune.trim().to_string(),
                multiplier: record.multiplier,
            });
        }

        let count = rules.len();
        for rule in rules {
            reference.upsert_commune(rule);
        }
        info!(count, "applied commune multiplier overrides");
        Ok(count)
    }
}
