mod canton;
mod civil_status;
mod ids;
mod pension;
mod portfolio;
mod tax_bracket;
mod tax_profile;
mod tax_result;
mod tax_rules;

pub use canton::Canton;
pub use civil_status::{CivilStatus, Confession};
pub use ids::ProfileId;
pub use pension::{Annuity, AvsAccount, LppAccount, ThirdPillarAccount, ThirdPillarKind, YearlyIncome};
pub use portfolio::{AssetKind, InsuranceContract, InsuranceKind, InvestmentAsset};
pub use tax_bracket::{BracketTable, BracketTableError, TaxBracket};
pub use tax_profile::{Deductions, TaxProfile};
pub use tax_result::{CantonalTax, TaxResult};
pub use tax_rules::{CantonTaxRule, ChurchTaxRule, CommuneTaxRule, ScaleKind, TaxStrategy};
