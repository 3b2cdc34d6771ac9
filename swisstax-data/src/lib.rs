//! CSV loaders for persisted finance rows and commune multiplier overrides.

mod communes;
mod loader;

pub use communes::{CommuneLoader, CommuneRecord};
pub use loader::{
    FinanceLoader, InsuranceContractRecord, InvestmentAssetRecord, LoaderError,
    YearlyIncomeRecord, parse_records,
};
