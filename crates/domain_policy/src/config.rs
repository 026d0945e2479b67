//! Company configuration
//!
//! An insurance company is described by its name, the month counting used
//! for proration, and the initial risk catalog:
//!
//! ```toml
//! name = "Mega Safe Insurance"
//! month_counting = "elapsed"
//!
//! [[risks]]
//! name = "Theft"
//! yearly_price = 200
//! ```

use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::premium::MonthCounting;
use crate::risk::Risk;

/// Default environment variable prefix
pub const ENV_PREFIX: &str = "INSURANCE";

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RiskConfig {
    pub name: String,
    pub yearly_price: Decimal,
}

/// Insurance company configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompanyConfig {
    /// Company name
    pub name: String,
    /// Month counting for premium proration
    #[serde(default)]
    pub month_counting: MonthCounting,
    /// Initial risk catalog
    #[serde(default)]
    pub risks: Vec<RiskConfig>,
}

impl CompanyConfig {
    /// Parses configuration from a TOML document
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Loads configuration from environment variables prefixed `INSURANCE_`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Loads configuration from environment variables with a custom prefix
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix(prefix))
            .build()?
            .try_deserialize()
    }

    /// Loads a configuration file, letting `INSURANCE_` variables override it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()
    }

    /// Builds the risk catalog described by this configuration
    pub fn catalog(&self) -> Vec<Risk> {
        self.risks
            .iter()
            .map(|risk| Risk::new(risk.name.clone(), risk.yearly_price))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_month_counting_defaults_to_elapsed() {
        let config = CompanyConfig::from_toml_str("name = \"Mega Safe Insurance\"").unwrap();
        assert_eq!(config.month_counting, MonthCounting::Elapsed);
        assert!(config.risks.is_empty());
    }

    #[test]
    fn test_catalog_from_toml() {
        let config = CompanyConfig::from_toml_str(
            r#"
            name = "Mega Safe Insurance"
            month_counting = "calendar_naive"

            [[risks]]
            name = "Theft"
            yearly_price = 200

            [[risks]]
            name = "Flood"
            yearly_price = "300.50"
            "#,
        )
        .unwrap();

        assert_eq!(config.month_counting, MonthCounting::CalendarNaive);
        assert_eq!(
            config.catalog(),
            vec![Risk::new("Theft", dec!(200)), Risk::new("Flood", dec!(300.50))]
        );
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(CompanyConfig::from_toml_str("month_counting = \"elapsed\"").is_err());
    }
}
