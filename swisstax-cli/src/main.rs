use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::debug;

use swisstax_cli::{app, config::Config, logging};

/// Swiss tax and pension estimator.
///
/// Reads a profile from `swisstax.toml`, loads the CSV files it names and
/// prints the requested report.
#[derive(Debug, Parser)]
#[command(name = "swisstax", version)]
struct Cli {
    /// Path of the profile file.
    #[arg(long, short, default_value = "swisstax.toml")]
    config: PathBuf,

    /// Log filter, overriding the `[logging]` level of the config.
    #[arg(long)]
    log_level: Option<String>,

    /// Reference date of the pension projections (YYYY-MM-DD), today by default.
    #[arg(long)]
    date: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Federal, cantonal, communal and church tax of the profile.
    Tax,
    /// AVS, LPP and 3rd pillar projection.
    Pension,
    /// Insurance premiums by category.
    Insurance,
    /// Portfolio valuation by asset kind and currency.
    Investments,
    /// Every report the profile has data for.
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(file) = &config.logging.file {
        logging::enable_file_logging(file)?;
    }
    debug!(config = %cli.config.display(), "configuration loaded");

    let service = app::build_service(&config)
        .await
        .context("cannot prepare profile data")?;
    let reference_date = cli.date.unwrap_or_else(|| Local::now().date_naive());

    let report = match cli.command.unwrap_or(Command::Summary) {
        Command::Tax => app::tax_report(&service, &config).await?,
        Command::Pension => app::pension_report(&service, &config, reference_date).await?,
        Command::Insurance => app::insurance_report(&service, &config).await?,
        Command::Investments => app::portfolio_report(&service, &config).await?,
        Command::Summary => app::full_report(&service, &config, reference_date).await?,
    };
    print!("{report}");

    Ok(())
}
