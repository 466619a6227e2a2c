//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the statutory
//! schedule from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{
    BenefitsConfig, ContributionRates, IncomeTaxConfig, OvertimeConfig, ScheduleMetadata,
    StatutoryConfig,
};

/// Loads and provides access to the statutory schedule.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and validates that the figures are usable before handing them out.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/sv/
/// ├── schedule.yaml       # Jurisdiction metadata and salary divisors
/// ├── contributions.yaml  # ISSS and AFP rates
/// ├── income_tax.yaml     # Withholding brackets
/// ├── overtime.yaml       # Overtime multipliers and hour caps
/// └── benefits.yaml       # Vacation, aguinaldo and payroll run rules
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// println!("Loaded schedule: {}", loader.schedule().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: StatutoryConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The figures are unusable (no tax brackets, zero divisors, no aguinaldo tiers)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/sv")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let contributions =
            Self::load_yaml::<ContributionRates>(&path.join("contributions.yaml"))?;
        let income_tax = Self::load_yaml::<IncomeTaxConfig>(&path.join("income_tax.yaml"))?;
        let overtime = Self::load_yaml::<OvertimeConfig>(&path.join("overtime.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsConfig>(&path.join("benefits.yaml"))?;

        let config = StatutoryConfig::new(metadata, contributions, income_tax, overtime, benefits);
        Self::validate(path, &config)?;

        debug!(
            path = %path.display(),
            code = %config.schedule().code,
            version = %config.schedule().version,
            "Loaded statutory configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Rejects figures the calculators cannot work with.
    fn validate(path: &Path, config: &StatutoryConfig) -> EngineResult<()> {
        let invalid = |file: &str, message: &str| EngineError::ConfigParseError {
            path: path.join(file).display().to_string(),
            message: message.to_string(),
        };

        let basis = config.salary_basis();
        if basis.days_per_month.is_zero() || basis.hours_per_day.is_zero() {
            return Err(invalid("schedule.yaml", "salary divisors must be non-zero"));
        }
        if config.income_tax().brackets.is_empty() {
            return Err(invalid("income_tax.yaml", "at least one bracket is required"));
        }
        let aguinaldo = &config.benefits().aguinaldo;
        if aguinaldo.tiers.is_empty() {
            return Err(invalid("benefits.yaml", "at least one aguinaldo tier is required"));
        }
        if aguinaldo.days_per_year.is_zero() {
            return Err(invalid("benefits.yaml", "days_per_year must be non-zero"));
        }
        for (name, month_day) in [
            ("window_start", aguinaldo.window_start),
            ("window_end", aguinaldo.window_end),
            ("reference_date", aguinaldo.reference_date),
        ] {
            // 2024 is a leap year, so Feb 29 is accepted.
            if month_day.in_year(2024).is_none() {
                return Err(invalid(
                    "benefits.yaml",
                    &format!("aguinaldo {} is not a valid month/day", name),
                ));
            }
        }

        Ok(())
    }

    /// Returns the underlying statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Returns the schedule metadata.
    pub fn schedule(&self) -> &ScheduleMetadata {
        self.config.schedule()
    }
}
