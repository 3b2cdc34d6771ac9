//! `swisstax.toml` layout.
//!
//! ```toml
//! owner = 1
//!
//! [logging]
//! level = "info"
//! file = "swisstax.log"
//!
//! [database]
//! backend = "memory"
//!
//! [profile]
//! canton = "GE"
//! commune = "Genève"
//! civil_status = "single"
//! gross_income = "80'000"
//!
//! [avs]
//! marital_status = "single"
//! average_income = "90000"
//! years_contributed = 44
//!
//! [[lpp]]
//! name = "Publica"
//! birth_date = "1980-05-01"
//! current_capital = "150000"
//! annual_contribution = "12000"
//! interest_rate = "0.0125"
//! conversion_rate = "0.068"
//!
//! [data]
//! insurance_contracts = "insurance_contracts.csv"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use swisstax_core::db::DbConfig;
use swisstax_core::input::TaxProfileForm;
use swisstax_core::pension::{AvsParameters, LppParameters};
use swisstax_core::{
    Annuity, AvsAccount, CivilStatus, LppAccount, ProfileId, ThirdPillarAccount, ThirdPillarKind,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

fn default_owner() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Profile id under which every section is stored.
    pub owner: i64,
    pub logging: LoggingConfig,
    pub database: DbConfig,
    pub profile: Option<TaxProfileForm>,
    pub avs: Option<AvsConfig>,
    pub lpp: Vec<LppConfig>,
    pub third_pillar: Vec<ThirdPillarConfig>,
    pub parameters: ParametersConfig,
    pub data: DataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner: default_owner(),
            logging: LoggingConfig::default(),
            database: DbConfig::default(),
            profile: None,
            avs: None,
            lpp: Vec::new(),
            third_pillar: Vec::new(),
            parameters: ParametersConfig::default(),
            data: DataConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.resolve_paths(dir);
        }
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn owner(&self) -> ProfileId {
        ProfileId(self.owner)
    }

    fn resolve_paths(
        &mut self,
        base: &Path,
    ) {
        let resolve = |path: &mut Option<PathBuf>| {
            if let Some(p) = path.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };
        resolve(&mut self.logging.file);
        resolve(&mut self.data.communes);
        resolve(&mut self.data.insurance_contracts);
        resolve(&mut self.data.investment_assets);
        resolve(&mut self.data.yearly_incomes);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub communes: Option<PathBuf>,
    pub insurance_contracts: Option<PathBuf>,
    pub investment_assets: Option<PathBuf>,
    pub yearly_incomes: Option<PathBuf>,
}

/// Overrides of the built-in pension parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ParametersConfig {
    pub avs: Option<AvsParameters>,
    pub lpp: Option<LppParameters>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AvsConfig {
    pub marital_status: CivilStatus,
    #[serde(default)]
    pub average_income: Decimal,
    pub years_contributed: u32,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub children: u32,
}

fn default_true() -> bool {
    true
}

impl AvsConfig {
    pub fn to_account(
        &self,
        owner: ProfileId,
    ) -> AvsAccount {
        AvsAccount {
            owner,
            marital_status: self.marital_status,
            average_income: self.average_income,
            years_contributed: self.years_contributed,
            active: self.active,
            children: self.children,
        }
    }
}

/// A pension fund as printed on its yearly certificate.
///
/// Certificate figures are annual amounts.
#[derive(Debug, Clone, Deserialize)]
pub struct LppConfig {
    pub name: String,
    pub birth_date: NaiveDate,
    pub current_capital: Decimal,
    #[serde(default)]
    pub annual_contribution: Decimal,
    #[serde(default)]
    pub interest_rate: Decimal,
    #[serde(default)]
    pub conversion_rate: Decimal,
    pub projected_retirement: Option<Decimal>,
    pub projected_disability: Option<Decimal>,
    pub projected_death_capital: Option<Decimal>,
}

impl LppConfig {
    pub fn to_account(
        &self,
        owner: ProfileId,
    ) -> LppAccount {
        LppAccount {
            owner,
            name: self.name.clone(),
            birth_date: self.birth_date,
            current_capital: self.current_capital,
            annual_contribution: self.annual_contribution,
            interest_rate: self.interest_rate,
            conversion_rate: self.conversion_rate,
            projected_retirement: self.projected_retirement.map(Annuity::from_annual),
            projected_disability: self.projected_disability.map(Annuity::from_annual),
            projected_death_capital: self.projected_death_capital,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThirdPillarConfig {
    pub name: String,
    pub kind: ThirdPillarKind,
    pub birth_date: NaiveDate,
    pub current_capital: Decimal,
    #[serde(default)]
    pub annual_contribution: Decimal,
    #[serde(default)]
    pub interest_rate: Decimal,
    pub insured_death_capital: Option<Decimal>,
    /// Annual disability rent of an insurance-linked policy.
    pub disability_annuity: Option<Decimal>,
}

impl ThirdPillarConfig {
    pub fn to_account(
        &self,
        owner: ProfileId,
    ) -> ThirdPillarAccount {
        ThirdPillarAccount {
            owner,
            name: self.name.clone(),
            kind: self.kind,
            birth_date: self.birth_date,
            current_capital: self.current_capital,
            annual_contribution: self.annual_contribution,
            interest_rate: self.interest_rate,
            insured_death_capital: self.insured_death_capital,
            disability_annuity: self.disability_annuity.map(Annuity::from_annual),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.owner(), ProfileId(1));
        assert_eq!(config.database.backend, "memory");
        assert!(config.profile.is_none());
        assert!(config.lpp.is_empty());
    }

    #[test]
    fn parses_every_section() {
        let text = r#"
owner = 7

[logging]
level = "debug"

[profile]
canton = "VD"
commune = "Lausanne"
civil_status = "married"
gross_income = "100'000"
children = "2"

[avs]
marital_status = "married"
average_income = "90000"
years_contributed = 44

[[lpp]]
name = "Publica"
birth_date = "1980-05-01"
current_capital = "150000"
annual_contribution = "12000"
interest_rate = "0.0125"
conversion_rate = "0.068"
projected_retirement = "36000"

[[third_pillar]]
name = "VIAC"
kind = "3a"
birth_date = "1980-05-01"
current_capital = "40000"
annual_contribution = "7258"
"#;

        let config = Config::parse(text).unwrap();

        assert_eq!(config.owner(), ProfileId(7));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.profile.unwrap().gross_income, "100'000");

        let avs = config.avs.unwrap().to_account(ProfileId(7));
        assert_eq!(avs.marital_status, CivilStatus::Married);
        assert!(avs.active);

        let lpp = config.lpp[0].to_account(ProfileId(7));
        assert_eq!(lpp.conversion_rate, dec!(0.068));
        assert_eq!(lpp.projected_retirement.unwrap().monthly(), dec!(3000));

        let third = config.third_pillar[0].to_account(ProfileId(7));
        assert_eq!(third.kind, ThirdPillarKind::Tied);
        assert_eq!(third.interest_rate, dec!(0));
    }

    #[test]
    fn relative_paths_follow_config_directory() {
        let mut config =
            Config::parse("[data]\ncommunes = \"communes.csv\"\nyearly_incomes = \"/abs/inc.csv\"")
                .unwrap();

        config.resolve_paths(Path::new("/etc/swisstax"));

        assert_eq!(
            config.data.communes,
            Some(PathBuf::from("/etc/swisstax/communes.csv"))
        );
        assert_eq!(config.data.yearly_incomes, Some(PathBuf::from("/abs/inc.csv")));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = Config::load(Path::new("/nonexistent/swisstax.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn unknown_third_pillar_kind_is_parse_error() {
        let text = r#"
[[third_pillar]]
name = "X"
kind = "3c"
birth_date = "1980-01-01"
current_capital = "0"
"#;

        assert!(Config::parse(text).is_err());
    }
}
