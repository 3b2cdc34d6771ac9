//! Wiring between the config file, the repository and the reports.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use swisstax_core::aggregation::{InsuranceSummary, PortfolioSummary};
use swisstax_core::db::RepositoryRegistry;
use swisstax_core::pension::PensionSummary;
use swisstax_core::{FinanceService, ReferenceData, TaxResult};
use swisstax_data::{CommuneLoader, FinanceLoader};
use tracing::{debug, info};

use crate::config::Config;
use crate::utils::{format_chf, format_percent, opt_chf_display};

/// Built-in reference tables with the commune overrides of the config applied.
pub fn load_reference(config: &Config) -> Result<ReferenceData> {
    let mut reference = ReferenceData::builtin().context("built-in tax scales are invalid")?;

    if let Some(path) = &config.data.communes {
        let records = CommuneLoader::parse(open(path)?)
            .with_context(|| format!("cannot parse '{}'", path.display()))?;
        CommuneLoader::apply(&mut reference, &records)
            .with_context(|| format!("invalid commune in '{}'", path.display()))?;
    }
    Ok(reference)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).with_context(|| format!("cannot open '{}'", path.display()))
}

/// Creates the configured repository and stores every section of the config
/// in it under the config owner.
pub async fn build_service(config: &Config) -> Result<FinanceService> {
    let reference = load_reference(config)?;

    debug!(backend = %config.database.backend, "creating repository");
    let registry = RepositoryRegistry::with_builtin_backends();
    let repo = registry
        .create(&config.database)
        .await
        .with_context(|| format!("cannot open '{}' backend", config.database.backend))?;

    let service = FinanceService::new(repo, reference).with_parameters(
        config.parameters.avs.clone().unwrap_or_default(),
        config.parameters.lpp.clone().unwrap_or_default(),
    );
    seed(&service, config).await?;
    Ok(service)
}

async fn seed(
    service: &FinanceService,
    config: &Config,
) -> Result<()> {
    let owner = config.owner();
    let repo = service.repository();

    if let Some(form) = &config.profile {
        let profile = form.validate().context("invalid [profile] section")?;
        repo.save_tax_profile(owner, &profile).await?;
    }
    if let Some(avs) = &config.avs {
        repo.save_avs_account(&avs.to_account(owner)).await?;
    }
    for lpp in &config.lpp {
        repo.insert_lpp_account(&lpp.to_account(owner)).await?;
    }
    for account in &config.third_pillar {
        repo.insert_third_pillar_account(&account.to_account(owner))
            .await?;
    }

    if let Some(path) = &config.data.yearly_incomes {
        let records = FinanceLoader::parse_yearly_incomes(open(path)?)?;
        FinanceLoader::load_yearly_incomes(repo, &records)
            .await
            .with_context(|| format!("cannot load '{}'", path.display()))?;
    }
    if let Some(path) = &config.data.insurance_contracts {
        let records = FinanceLoader::parse_contracts(open(path)?)?;
        FinanceLoader::load_contracts(repo, &records)
            .await
            .with_context(|| format!("cannot load '{}'", path.display()))?;
    }
    if let Some(path) = &config.data.investment_assets {
        let records = FinanceLoader::parse_assets(open(path)?)?;
        FinanceLoader::load_assets(repo, &records)
            .await
            .with_context(|| format!("cannot load '{}'", path.display()))?;
    }

    info!(%owner, "profile data loaded");
    Ok(())
}

pub async fn tax_report(
    service: &FinanceService,
    config: &Config,
) -> Result<String> {
    let owner = config.owner();
    let result = service
        .compute_tax(owner)
        .await
        .context("tax calculation failed")?;
    let savings = service.third_pillar_savings(owner).await?;
    Ok(render_tax(&result, savings))
}

pub async fn pension_report(
    service: &FinanceService,
    config: &Config,
    reference_date: NaiveDate,
) -> Result<String> {
    let summary = service
        .compute_pensions(config.owner(), reference_date)
        .await
        .context("pension projection failed")?;
    Ok(render_pensions(&summary))
}

pub async fn insurance_report(
    service: &FinanceService,
    config: &Config,
) -> Result<String> {
    let summary = service.insurance_summary(config.owner()).await?;
    Ok(render_insurance(&summary))
}

pub async fn portfolio_report(
    service: &FinanceService,
    config: &Config,
) -> Result<String> {
    let summary = service.portfolio_summary(config.owner()).await?;
    Ok(render_portfolio(&summary))
}

/// Every report the config has data for, separated by blank lines.
pub async fn full_report(
    service: &FinanceService,
    config: &Config,
    reference_date: NaiveDate,
) -> Result<String> {
    let mut sections = Vec::new();
    if config.profile.is_some() {
        sections.push(tax_report(service, config).await?);
    }
    sections.push(pension_report(service, config, reference_date).await?);
    if config.data.insurance_contracts.is_some() {
        sections.push(insurance_report(service, config).await?);
    }
    if config.data.investment_assets.is_some() {
        sections.push(portfolio_report(service, config).await?);
    }
    Ok(sections.join("\n"))
}

fn line(
    out: &mut String,
    label: &str,
    value: impl AsRef<str>,
) {
    out.push_str(&format!("  {label:<24}{:>16}\n", value.as_ref()));
}

pub fn render_tax(
    result: &TaxResult,
    third_pillar_savings: Decimal,
) -> String {
    let place = match (&result.canton, &result.commune) {
        (Some(canton), Some(commune)) => format!("{commune} ({canton})"),
        _ => "-".to_string(),
    };
    let mut out = format!("Tax estimate, {place}\n");
    line(&mut out, "Taxable income", format_chf(result.taxable_income));
    line(&mut out, "Taxable wealth", format_chf(result.taxable_wealth));
    line(&mut out, "Federal tax", format_chf(result.federal_tax));
    line(&mut out, "Cantonal tax", format_chf(result.cantonal_tax));
    line(&mut out, "Communal tax", format_chf(result.communal_tax));
    line(&mut out, "Church tax", format_chf(result.ecclesiastical_tax));
    line(&mut out, "Total tax", format_chf(result.total_tax));
    line(&mut out, "Per month", format_chf(result.monthly_total()));
    line(&mut out, "Effective rate", format_percent(result.effective_rate));
    line(&mut out, "Saved by pillar 3a", format_chf(third_pillar_savings));
    out
}

pub fn render_pensions(summary: &PensionSummary) -> String {
    let mut out = String::from("Pension projection (monthly)\n");
    line(
        &mut out,
        "AVS old age",
        opt_chf_display(summary.avs.as_ref().map(|a| a.old_age.monthly())),
    );
    for lpp in &summary.lpp {
        line(&mut out, &format!("LPP {}", lpp.name), format_chf(lpp.retirement.monthly()));
    }
    for account in &summary.third_pillar {
        line(
            &mut out,
            &format!("3rd pillar {}", account.name),
            format_chf(account.retirement.monthly()),
        );
    }
    line(&mut out, "Retirement", format_chf(summary.retirement.monthly()));
    line(&mut out, "Disability", format_chf(summary.disability.monthly()));
    line(&mut out, "Survivors", format_chf(summary.survivors.monthly()));
    line(&mut out, "Capital at retirement", format_chf(summary.capital_at_retirement));
    line(&mut out, "Death capital", format_chf(summary.death_capital));
    line(&mut out, "Replacement ratio", format_percent(summary.replacement_ratio));
    out
}

pub fn render_insurance(summary: &InsuranceSummary) -> String {
    let mut out = format!("Insurance premiums ({} contracts)\n", summary.contracts);
    for category in &summary.categories {
        line(
            &mut out,
            category.kind.as_str(),
            format!(
                "{} / {}",
                format_chf(category.annual_premium),
                format_percent(category.share)
            ),
        );
    }
    line(&mut out, "Total per year", format_chf(summary.annual_premium));
    line(&mut out, "Total per month", format_chf(summary.monthly_premium));
    out
}

pub fn render_portfolio(summary: &PortfolioSummary) -> String {
    let mut out = format!("Portfolio ({} positions)\n", summary.total.positions);
    for (kind, group) in &summary.by_kind {
        line(&mut out, kind.as_str(), format_chf(group.market_value));
    }
    for (currency, group) in &summary.by_currency {
        line(&mut out, currency, format_percent(group.share));
    }
    line(&mut out, "Invested", format_chf(summary.total.invested));
    line(&mut out, "Market value", format_chf(summary.total.market_value));
    line(&mut out, "Gain", format_chf(summary.total.gain));
    line(&mut out, "Gain %", format_percent(summary.total.gain_percent));
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use swisstax_core::aggregation::summarize_insurance;
    use swisstax_core::{Canton, InsuranceContract, InsuranceKind, ProfileId};

    use super::*;

    #[test]
    fn tax_report_lists_every_component() {
        let result = TaxResult {
            canton: Some(Canton::Geneva),
            commune: Some("Genève".to_string()),
            taxable_income: dec!(80000),
            taxable_wealth: dec!(0),
            federal_tax: dec!(1355.86),
            cantonal_tax: dec!(10910.22),
            communal_tax: dec!(3786.60),
            ecclesiastical_tax: dec!(0),
            total_tax: dec!(16052.68),
            effective_rate: dec!(20.07),
        };

        let report = render_tax(&result, dec!(1800.40));

        assert!(report.starts_with("Tax estimate, Genève (GE)\n"));
        assert!(report.contains("CHF 16'053"));
        assert!(report.contains("20.07 %"));
        assert!(report.contains("CHF 1'800"));
        assert_eq!(report.lines().count(), 11);
    }

    #[test]
    fn zero_result_has_no_place() {
        let report = render_tax(&TaxResult::zero(), dec!(0));

        assert!(report.starts_with("Tax estimate, -\n"));
    }

    #[test]
    fn insurance_report_shows_shares() {
        let contracts = [
            InsuranceContract {
                id: 1,
                owner: ProfileId(1),
                kind: InsuranceKind::Health,
                provider: "CSS".to_string(),
                annual_premium: dec!(4500),
                active: true,
            },
            InsuranceContract {
                id: 2,
                owner: ProfileId(1),
                kind: InsuranceKind::Liability,
                provider: "AXA".to_string(),
                annual_premium: dec!(500),
                active: true,
            },
        ];

        let report = render_insurance(&summarize_insurance(&contracts));

        assert!(report.contains("CHF 4'500 / 90.00 %"));
        assert!(report.contains("CHF 417"));
    }

    #[test]
    fn load_reference_without_overrides_is_builtin() {
        let reference = load_reference(&Config::default()).unwrap();

        assert_eq!(
            reference.commune(Canton::Geneva, "Genève").unwrap().multiplier,
            ReferenceData::builtin()
                .unwrap()
                .commune(Canton::Geneva, "Genève")
                .unwrap()
                .multiplier
        );
    }
}
