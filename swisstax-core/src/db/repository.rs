use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    AvsAccount, InsuranceContract, InvestmentAsset, LppAccount, ProfileId, TaxProfile, TaxResult,
    ThirdPillarAccount, YearlyIncome,
};
use crate::pension::PensionSummary;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Persistence collaborator of the finance service.
///
/// Every row belongs to one profile; the engine never interprets the id.
#[async_trait]
pub trait FinanceRepository: Send + Sync {
    // Tax
    async fn get_tax_profile(&self, owner: ProfileId) -> Result<TaxProfile, RepositoryError>;

    async fn save_tax_profile(
        &self,
        owner: ProfileId,
        profile: &TaxProfile,
    ) -> Result<(), RepositoryError>;

    async fn get_tax_result(&self, owner: ProfileId) -> Result<TaxResult, RepositoryError>;

    async fn save_tax_result(
        &self,
        owner: ProfileId,
        result: &TaxResult,
    ) -> Result<(), RepositoryError>;

    // First pillar
    async fn get_avs_account(&self, owner: ProfileId) -> Result<AvsAccount, RepositoryError>;

    async fn save_avs_account(&self, account: &AvsAccount) -> Result<(), RepositoryError>;

    async fn list_yearly_incomes(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<YearlyIncome>, RepositoryError>;

    async fn insert_yearly_income(&self, income: &YearlyIncome) -> Result<(), RepositoryError>;

    // Second and third pillar
    async fn list_lpp_accounts(&self, owner: ProfileId)
    -> Result<Vec<LppAccount>, RepositoryError>;

    async fn insert_lpp_account(&self, account: &LppAccount) -> Result<(), RepositoryError>;

    async fn list_third_pillar_accounts(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<ThirdPillarAccount>, RepositoryError>;

    async fn insert_third_pillar_account(
        &self,
        account: &ThirdPillarAccount,
    ) -> Result<(), RepositoryError>;

    async fn get_pension_summary(
        &self,
        owner: ProfileId,
    ) -> Result<PensionSummary, RepositoryError>;

    async fn save_pension_summary(&self, summary: &PensionSummary)
    -> Result<(), RepositoryError>;

    // Insurance and investments
    async fn list_insurance_contracts(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<InsuranceContract>, RepositoryError>;

    async fn insert_insurance_contract(
        &self,
        contract: &InsuranceContract,
    ) -> Result<(), RepositoryError>;

    async fn list_investment_assets(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<InvestmentAsset>, RepositoryError>;

    async fn insert_investment_asset(
        &self,
        asset: &InvestmentAsset,
    ) -> Result<(), RepositoryError>;
}
