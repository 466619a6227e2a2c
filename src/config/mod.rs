//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the statutory schedule from YAML
//! files, including contribution rates, income-tax brackets, overtime
//! multipliers and benefit rules.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/sv").unwrap();
//! println!("Loaded schedule: {}", config.schedule().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AguinaldoConfig, AguinaldoIdempotence, AguinaldoTier, BenefitsConfig, ContributionRates,
    IncomeTaxConfig, MonthDay, OvertimeConfig, OvertimeHourCaps, OvertimeMultipliers,
    PayrollRunConfig, PensionRates, SalaryBasis, ScheduleMetadata, SocialSecurityRates,
    StatutoryConfig, TaxBracket, VacationConfig,
};
