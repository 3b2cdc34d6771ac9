use std::io::Read;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use swisstax_core::{
    AssetKind, FinanceRepository, InsuranceContract, InsuranceKind, InvestmentAsset, ProfileId,
    RepositoryError, YearlyIncome,
};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading CSV rows.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("Invalid {field} '{value}' on row {row}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

/// Reads every row of a headed CSV into `T`.
pub fn parse_records<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>, LoaderError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for result in csv_reader.deserialize() {
        let record: T = result?;
        records.push(record);
    }

    Ok(records)
}

pub(crate) fn deserialize_optional_decimal<'de, D>(
    deserializer: D
) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn default_true() -> bool {
    true
}

/// A row of the insurance contracts CSV.
///
/// Columns: `id` (0 or empty lets the store assign one), `owner`, `kind`,
/// `provider`, `annual_premium`, `active` (defaults to true).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InsuranceContractRecord {
    #[serde(default)]
    pub id: i64,
    pub owner: i64,
    pub kind: String,
    pub provider: String,
    pub annual_premium: Decimal,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl InsuranceContractRecord {
    fn to_contract(
        &self,
        row: usize,
    ) -> Result<InsuranceContract, LoaderError> {
        let kind = InsuranceKind::parse(&self.kind).ok_or_else(|| LoaderError::InvalidField {
            row,
            field: "insurance kind",
            value: self.kind.clone(),
        })?;
        Ok(InsuranceContract {
            id: self.id,
            owner: ProfileId(self.owner),
            kind,
            provider: self.provider.clone(),
            annual_premium: self.annual_premium,
            active: self.active,
        })
    }
}

/// A row of the investment assets CSV. An empty `current_price` means no quote.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InvestmentAssetRecord {
    #[serde(default)]
    pub id: i64,
    pub owner: i64,
    pub kind: String,
    pub symbol: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    #[serde(default, deserialize_with = "deserialize_optional_decimal")]
    pub current_price: Option<Decimal>,
    pub currency: String,
}

impl InvestmentAssetRecord {
    fn to_asset(
        &self,
        row: usize,
    ) -> Result<InvestmentAsset, LoaderError> {
        let kind = AssetKind::parse(&self.kind).ok_or_else(|| LoaderError::InvalidField {
            row,
            field: "asset kind",
            value: self.kind.clone(),
        })?;
        Ok(InvestmentAsset {
            id: self.id,
            owner: ProfileId(self.owner),
            kind,
            symbol: self.symbol.clone(),
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
            currency: self.currency.to_uppercase(),
        })
    }
}

/// A row of an AVS income statement.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct YearlyIncomeRecord {
    pub owner: i64,
    pub year: i32,
    pub income: Decimal,
    #[serde(default)]
    pub estimated: bool,
}

impl From<&YearlyIncomeRecord> for YearlyIncome {
    fn from(record: &YearlyIncomeRecord) -> Self {
        YearlyIncome {
            owner: ProfileId(record.owner),
            year: record.year,
            income: record.income,
            estimated: record.estimated,
        }
    }
}

/// Loads persisted rows from CSV into a [`FinanceRepository`].
///
/// Every row is validated before the first insert, so a bad kind on the
/// last line leaves the repository untouched.
pub struct FinanceLoader;

impl FinanceLoader {
    pub fn parse_contracts<R: Read>(
        reader: R
    ) -> Result<Vec<InsuranceContractRecord>, LoaderError> {
        parse_records(reader)
    }

    pub fn parse_assets<R: Read>(reader: R) -> Result<Vec<InvestmentAssetRecord>, LoaderError> {
        parse_records(reader)
    }

    pub fn parse_yearly_incomes<R: Read>(
        reader: R
    ) -> Result<Vec<YearlyIncomeRecord>, LoaderError> {
        parse_records(reader)
    }

    /// Inserts the contracts and returns how many were stored.
    pub async fn load_contracts<R: FinanceRepository + ?Sized>(
        repo: &R,
        records: &[InsuranceContractRecord],
    ) -> Result<usize, LoaderError> {
        // Row 1 is the header.
        let contracts = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.to_contract(i + 2))
            .collect::<Result<Vec<_>, _>>()?;

        for contract in &contracts {
            repo.insert_insurance_contract(contract).await?;
        }
        debug!(count = contracts.len(), "loaded insurance contracts");
        Ok(contracts.len())
    }

    pub async fn load_assets<R: FinanceRepository + ?Sized>(
        repo: &R,
        records: &[InvestmentAssetRecord],
    ) -> Result<usize, LoaderError> {
        let assets = records
            .iter()
            .enumerate()
            .map(|(i, r)| r.to_asset(i + 2))
            .collect::<Result<Vec<_>, _>>()?;

        for asset in &assets {
            repo.insert_investment_asset(asset).await?;
        }
        debug!(count = assets.len(), "loaded investment assets");
        Ok(assets.len())
    }

    /// Inserts the incomes; a second row for the same owner and year replaces
    /// the first.
    pub async fn load_yearly_incomes<R: FinanceRepository + ?Sized>(
        repo: &R,
        records: &[YearlyIncomeRecord],
    ) -> Result<usize, LoaderError> {
        for (i, record) in records.iter().enumerate() {
            if record.income < Decimal::ZERO {
                return Err(LoaderError::InvalidField {
                    row: i + 2,
                    field: "income",
                    value: record.income.to_string(),
                });
            }
        }

        for record in records {
            repo.insert_yearly_income(&record.into()).await?;
        }
        debug!(count = records.len(), "loaded yearly incomes");
        Ok(records.len())
    }
}
