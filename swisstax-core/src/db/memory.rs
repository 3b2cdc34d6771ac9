//! In-memory backend, registered as `memory`.
//!
//! Rows live in a single `RwLock`-guarded state and disappear with the
//! process. Used by the command-line tool and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::factory::{DbConfig, RepositoryFactory};
use super::repository::{FinanceRepository, RepositoryError};
use crate::models::{
    AvsAccount, InsuranceContract, InvestmentAsset, LppAccount, ProfileId, TaxProfile, TaxResult,
    ThirdPillarAccount, YearlyIncome,
};
use crate::pension::PensionSummary;

#[derive(Debug, Default)]
struct State {
    tax_profiles: HashMap<ProfileId, TaxProfile>,
    tax_results: HashMap<ProfileId, TaxResult>,
    avs_accounts: HashMap<ProfileId, AvsAccount>,
    yearly_incomes: Vec<YearlyIncome>,
    lpp_accounts: Vec<LppAccount>,
    third_pillar_accounts: Vec<ThirdPillarAccount>,
    pension_summaries: HashMap<ProfileId, PensionSummary>,
    insurance_contracts: Vec<InsuranceContract>,
    investment_assets: Vec<InvestmentAsset>,
    next_id: i64,
}

impl State {
    /// Keeps an explicit id, or hands out the next free one for id 0.
    fn assign_id(
        &mut self,
        id: i64,
    ) -> i64 {
        if id != 0 {
            self.next_id = self.next_id.max(id);
            return id;
        }
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: RwLock<State>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn owned_by<T: Clone>(
    rows: &[T],
    owner: ProfileId,
    owner_of: impl Fn(&T) -> ProfileId,
) -> Vec<T> {
    rows.iter()
        .filter(|row| owner_of(row) == owner)
        .cloned()
        .collect()
}

#[async_trait]
impl FinanceRepository for MemoryRepository {
    async fn get_tax_profile(&self, owner: ProfileId) -> Result<TaxProfile, RepositoryError> {
        self.state
            .read()
            .await
            .tax_profiles
            .get(&owner)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save_tax_profile(
        &self,
        owner: ProfileId,
        profile: &TaxProfile,
    ) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .tax_profiles
            .insert(owner, profile.clone());
        Ok(())
    }

    async fn get_tax_result(&self, owner: ProfileId) -> Result<TaxResult, RepositoryError> {
        self.state
            .read()
            .await
            .tax_results
            .get(&owner)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save_tax_result(
        &self,
        owner: ProfileId,
        result: &TaxResult,
    ) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .tax_results
            .insert(owner, result.clone());
        Ok(())
    }

    async fn get_avs_account(&self, owner: ProfileId) -> Result<AvsAccount, RepositoryError> {
        self.state
            .read()
            .await
            .avs_accounts
            .get(&owner)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save_avs_account(&self, account: &AvsAccount) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .avs_accounts
            .insert(account.owner, account.clone());
        Ok(())
    }

    async fn list_yearly_incomes(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<YearlyIncome>, RepositoryError> {
        let state = self.state.read().await;
        let mut incomes = owned_by(&state.yearly_incomes, owner, |y| y.owner);
        incomes.sort_by_key(|y| y.year);
        Ok(incomes)
    }

    async fn insert_yearly_income(&self, income: &YearlyIncome) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        // One row per owner and year.
        state
            .yearly_incomes
            .retain(|y| !(y.owner == income.owner && y.year == income.year));
        state.yearly_incomes.push(income.clone());
        Ok(())
    }

    async fn list_lpp_accounts(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<LppAccount>, RepositoryError> {
        Ok(owned_by(&self.state.read().await.lpp_accounts, owner, |a| a.owner))
    }

    async fn insert_lpp_account(&self, account: &LppAccount) -> Result<(), RepositoryError> {
        self.state.write().await.lpp_accounts.push(account.clone());
        Ok(())
    }

    async fn list_third_pillar_accounts(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<ThirdPillarAccount>, RepositoryError> {
        Ok(owned_by(
            &self.state.read().await.third_pillar_accounts,
            owner,
            |a| a.owner,
        ))
    }

    async fn insert_third_pillar_account(
        &self,
        account: &ThirdPillarAccount,
    ) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .third_pillar_accounts
            .push(account.clone());
        Ok(())
    }

    async fn get_pension_summary(
        &self,
        owner: ProfileId,
    ) -> Result<PensionSummary, RepositoryError> {
        self.state
            .read()
            .await
            .pension_summaries
            .get(&owner)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn save_pension_summary(
        &self,
        summary: &PensionSummary,
    ) -> Result<(), RepositoryError> {
        self.state
            .write()
            .await
            .pension_summaries
            .insert(summary.owner, summary.clone());
        Ok(())
    }

    async fn list_insurance_contracts(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<InsuranceContract>, RepositoryError> {
        Ok(owned_by(
            &self.state.read().await.insurance_contracts,
            owner,
            |c| c.owner,
        ))
    }

    async fn insert_insurance_contract(
        &self,
        contract: &InsuranceContract,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let id = state.assign_id(contract.id);
        state.insurance_contracts.push(InsuranceContract {
            id,
            ..contract.clone()
        });
        Ok(())
    }

    async fn list_investment_assets(
        &self,
        owner: ProfileId,
    ) -> Result<Vec<InvestmentAsset>, RepositoryError> {
        Ok(owned_by(
            &self.state.read().await.investment_assets,
            owner,
            |a| a.owner,
        ))
    }

    async fn insert_investment_asset(
        &self,
        asset: &InvestmentAsset,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        let id = state.assign_id(asset.id);
        state.investment_assets.push(InvestmentAsset {
            id,
            ..asset.clone()
        });
        Ok(())
    }
}

/// Factory for the `memory` backend. The connection string is ignored.
pub struct MemoryRepositoryFactory;

#[async_trait]
impl RepositoryFactory for MemoryRepositoryFactory {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn create(
        &self,
        _config: &DbConfig,
    ) -> Result<Box<dyn FinanceRepository>, RepositoryError> {
        Ok(Box::new(MemoryRepository::new()))
    }
}
