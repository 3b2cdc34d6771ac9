//! Load, compute, write back.
//!
//! [`FinanceService`] is the only part of the crate that talks to a
//! [`FinanceRepository`]; everything it calls is synchronous and pure.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, info};

use crate::aggregation::{
    InsuranceSummary, PortfolioSummary, summarize_insurance, summarize_portfolio,
};
use crate::calculations::{TaxCalculator, TaxError};
use crate::db::{FinanceRepository, RepositoryError};
use crate::models::{ProfileId, TaxResult};
use crate::pension::{
    AvsParameters, AvsProjection, LppParameters, PensionError, PensionSummary, project_avs,
    project_couple, project_lpp, project_third_pillar, summarize,
};
use crate::reference::ReferenceData;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Tax(#[from] TaxError),

    #[error(transparent)]
    Pension(#[from] PensionError),
}

pub struct FinanceService {
    repository: Box<dyn FinanceRepository>,
    reference: ReferenceData,
    avs: AvsParameters,
    lpp: LppParameters,
}

impl FinanceService {
    pub fn new(
        repository: Box<dyn FinanceRepository>,
        reference: ReferenceData,
    ) -> Self {
        Self {
            repository,
            reference,
            avs: AvsParameters::default(),
            lpp: LppParameters::default(),
        }
    }

    pub fn with_parameters(
        mut self,
        avs: AvsParameters,
        lpp: LppParameters,
    ) -> Self {
        self.avs = avs;
        self.lpp = lpp;
        self
    }

    pub fn repository(&self) -> &dyn FinanceRepository {
        self.repository.as_ref()
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Computes the tax of the stored profile and stores the result.
    pub async fn compute_tax(
        &self,
        owner: ProfileId,
    ) -> Result<TaxResult, ServiceError> {
        let profile = self.repository.get_tax_profile(owner).await?;
        let result = TaxCalculator::new(&self.reference).calculate(&profile)?;

        self.repository.save_tax_result(owner, &result).await?;
        info!(%owner, total = %result.total_tax, "tax result saved");
        Ok(result)
    }

    /// Tax saved by the stored profile's pillar 3a deduction.
    pub async fn third_pillar_savings(
        &self,
        owner: ProfileId,
    ) -> Result<Decimal, ServiceError> {
        let profile = self.repository.get_tax_profile(owner).await?;
        Ok(TaxCalculator::new(&self.reference).third_pillar_savings(&profile)?)
    }

    /// Projects every pension account of `owner` as of `reference_date` and
    /// stores the combined summary.
    ///
    /// A missing AVS account or tax profile is not an error: the summary
    /// then has no first pillar, or a zero replacement ratio.
    pub async fn compute_pensions(
        &self,
        owner: ProfileId,
        reference_date: NaiveDate,
    ) -> Result<PensionSummary, ServiceError> {
        let avs = match self.repository.get_avs_account(owner).await {
            Ok(account) => {
                let incomes = self.repository.list_yearly_incomes(owner).await?;
                Some(project_avs(&account, &incomes, &self.avs)?)
            }
            Err(RepositoryError::NotFound) => None,
            Err(e) => return Err(e.into()),
        };

        let lpp = self
            .repository
            .list_lpp_accounts(owner)
            .await?
            .iter()
            .map(|account| project_lpp(account, reference_date, &self.lpp))
            .collect::<Result<Vec<_>, _>>()?;

        let third_pillar = self
            .repository
            .list_third_pillar_accounts(owner)
            .await?
            .iter()
            .map(|account| project_third_pillar(account, reference_date, &self.lpp))
            .collect::<Result<Vec<_>, _>>()?;

        let current_income = match self.repository.get_tax_profile(owner).await {
            Ok(profile) => profile.gross_income,
            Err(RepositoryError::NotFound) => Decimal::ZERO,
            Err(e) => return Err(e.into()),
        };
        debug!(
            %owner,
            lpp = lpp.len(),
            third_pillar = third_pillar.len(),
            "summarizing pensions"
        );

        let summary = summarize(owner, avs, lpp, third_pillar, current_income);
        self.repository.save_pension_summary(&summary).await?;
        Ok(summary)
    }

    /// Projects the AVS pensions of two spouses, capped to the couple ceiling
    /// when both accounts are married. Both accounts must exist.
    pub async fn compute_couple_avs(
        &self,
        first: ProfileId,
        second: ProfileId,
    ) -> Result<(AvsProjection, AvsProjection), ServiceError> {
        let first_account = self.repository.get_avs_account(first).await?;
        let first_incomes = self.repository.list_yearly_incomes(first).await?;
        let second_account = self.repository.get_avs_account(second).await?;
        let second_incomes = self.repository.list_yearly_incomes(second).await?;

        let projections = project_couple(
            (&first_account, &first_incomes),
            (&second_account, &second_incomes),
            &self.avs,
        )?;
        debug!(%first, %second, "projected couple AVS pensions");
        Ok(projections)
    }

    pub async fn insurance_summary(
        &self,
        owner: ProfileId,
    ) -> Result<InsuranceSummary, ServiceError> {
        let contracts = self.repository.list_insurance_contracts(owner).await?;
        Ok(summarize_insurance(&contracts))
    }

    pub async fn portfolio_summary(
        &self,
        owner: ProfileId,
    ) -> Result<PortfolioSummary, ServiceError> {
        let assets = self.repository.list_investment_assets(owner).await?;
        Ok(summarize_portfolio(&assets))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::db::MemoryRepository;
    use crate::models::{
        AvsAccount, Canton, CivilStatus, Confession, Deductions, InsuranceContract,
        InsuranceKind, LppAccount, TaxProfile, YearlyIncome,
    };

    const OWNER: ProfileId = ProfileId(42);

    fn service() -> FinanceService {
        FinanceService::new(
            Box::new(MemoryRepository::new()),
            ReferenceData::builtin().unwrap(),
        )
    }

    fn profile() -> TaxProfile {
        TaxProfile {
            canton: Canton::Geneva,
            commune: "Genève".to_string(),
            civil_status: CivilStatus::Single,
            confession: Confession::None,
            gross_income: dec!(80000),
            net_wealth: dec!(0),
            children: 0,
            deductions: Deductions::default(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn compute_tax_saves_result() {
        let service = service();
        service
            .repository()
            .save_tax_profile(OWNER, &profile())
            .await
            .unwrap();

        let result = service.compute_tax(OWNER).await.unwrap();

        assert_eq!(result.cantonal_tax, dec!(10910.22));
        assert_eq!(service.repository().get_tax_result(OWNER).await.unwrap(), result);
    }

    #[tokio::test]
    async fn compute_tax_without_profile_is_not_found() {
        let err = service().compute_tax(OWNER).await.unwrap_err();

        assert!(matches!(err, ServiceError::Repository(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn compute_tax_surfaces_unknown_commune() {
        let service = service();
        let mut p = profile();
        p.commune = "Lausanne".to_string();
        service.repository().save_tax_profile(OWNER, &p).await.unwrap();

        let err = service.compute_tax(OWNER).await.unwrap_err();

        assert!(matches!(err, ServiceError::Tax(TaxError::UnknownCommune { .. })));
    }

    #[tokio::test]
    async fn compute_pensions_combines_pillars() {
        let service = service();
        let repo = service.repository();
        repo.save_tax_profile(OWNER, &profile()).await.unwrap();
        repo.save_avs_account(&AvsAccount {
            owner: OWNER,
            marital_status: CivilStatus::Single,
            average_income: dec!(90000),
            years_contributed: 44,
            active: true,
            children: 0,
        })
        .await
        .unwrap();
        repo.insert_lpp_account(&LppAccount {
            owner: OWNER,
            name: "Publica".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1965, 1, 1).unwrap(),
            current_capital: dec!(500000),
            annual_contribution: dec!(0),
            interest_rate: dec!(0),
            conversion_rate: dec!(0.068),
            projected_retirement: None,
            projected_disability: None,
            projected_death_capital: None,
        })
        .await
        .unwrap();

        let summary = service.compute_pensions(OWNER, date()).await.unwrap();

        // 30124.80 AVS + 34000 LPP
        assert_eq!(summary.retirement.annual(), dec!(64124.80));
        assert_eq!(summary.replacement_ratio, dec!(80.16));
        assert_eq!(
            service.repository().get_pension_summary(OWNER).await.unwrap(),
            summary
        );
    }

    #[tokio::test]
    async fn compute_pensions_without_accounts_is_empty() {
        let summary = service().compute_pensions(OWNER, date()).await.unwrap();

        assert!(summary.avs.is_none());
        assert_eq!(summary.retirement.annual(), dec!(0));
    }

    #[tokio::test]
    async fn insurance_summary_reads_owner_contracts() {
        let service = service();
        service
            .repository()
            .insert_insurance_contract(&InsuranceContract {
                id: 0,
                owner: OWNER,
                kind: InsuranceKind::Health,
                provider: "Helsana".to_string(),
                annual_premium: dec!(5400),
                active: true,
            })
            .await
            .unwrap();

        let summary = service.insurance_summary(OWNER).await.unwrap();

        assert_eq!(summary.monthly_premium, dec!(450));
    }

    #[tokio::test]
    async fn compute_pensions_reports_overflow_instead_of_panicking() {
        let service = service();
        service
            .repository()
            .insert_lpp_account(&LppAccount {
                owner: OWNER,
                name: "Runaway".to_string(),
                birth_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                current_capital: dec!(10000000000),
                annual_contribution: dec!(0),
                interest_rate: dec!(1),
                conversion_rate: dec!(0.068),
                projected_retirement: None,
                projected_disability: None,
                projected_death_capital: None,
            })
            .await
            .unwrap();

        let err = service.compute_pensions(OWNER, date()).await.unwrap_err();

        assert!(matches!(
            err,
            ServiceError::Pension(PensionError::Overflow { .. })
        ));
    }

    fn married_account(owner: ProfileId) -> AvsAccount {
        AvsAccount {
            owner,
            marital_status: CivilStatus::Married,
            average_income: dec!(90720),
            years_contributed: 44,
            active: true,
            children: 0,
        }
    }

    #[tokio::test]
    async fn compute_couple_avs_applies_ceiling() {
        let service = service();
        let repo = service.repository();
        repo.save_avs_account(&married_account(OWNER)).await.unwrap();
        repo.save_avs_account(&married_account(ProfileId(43)))
            .await
            .unwrap();

        let (first, second) = service
            .compute_couple_avs(OWNER, ProfileId(43))
            .await
            .unwrap();

        assert_eq!(first.old_age.monthly(), dec!(1890));
        assert_eq!(second.old_age.monthly(), dec!(1890));
    }

    #[tokio::test]
    async fn compute_couple_avs_needs_both_accounts() {
        let service = service();
        service
            .repository()
            .save_avs_account(&married_account(OWNER))
            .await
            .unwrap();

        let err = service
            .compute_couple_avs(OWNER, ProfileId(43))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Repository(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn inactive_account_drops_forecast_incomes() {
        let service = service();
        let repo = service.repository();
        let mut account = married_account(OWNER);
        account.active = false;
        repo.save_avs_account(&account).await.unwrap();
        for (year, income, estimated) in [(2024, dec!(60000), false), (2030, dec!(150000), true)] {
            repo.insert_yearly_income(&YearlyIncome {
                owner: OWNER,
                year,
                income,
                estimated,
            })
            .await
            .unwrap();
        }

        let summary = service.compute_pensions(OWNER, date()).await.unwrap();

        assert_eq!(summary.avs.unwrap().determinant_income, dec!(60000));
    }
}
