//! Configuration types for the statutory payroll schedule.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::{OvertimeRateType, PeriodLocale};

/// How many days and hours make up a payroll month.
#[derive(Debug, Clone, Deserialize)]
pub struct SalaryBasis {
    /// Days in a payroll month (daily salary = base salary / this).
    pub days_per_month: Decimal,
    /// Working hours in a day (hourly rate = daily salary / this).
    pub hours_per_day: Decimal,
}

/// Metadata about the schedule, from `schedule.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMetadata {
    /// The jurisdiction code (e.g., "SV").
    pub code: String,
    /// The human-readable name of the schedule.
    pub name: String,
    /// The version or effective date of the schedule.
    pub version: String,
    /// ISO currency code of all amounts.
    pub currency: String,
    /// Locale used for payroll period labels.
    #[serde(default)]
    pub locale: PeriodLocale,
    /// Salary divisors.
    pub salary_basis: SalaryBasis,
}

/// Social-security (ISSS) rates.
#[derive(Debug, Clone, Deserialize)]
pub struct SocialSecurityRates {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// Employee share.
    pub employee_rate: Decimal,
    /// Employer share.
    pub employer_rate: Decimal,
    /// Pay above this amount is not subject to either share.
    pub salary_ceiling: Decimal,
}

/// Pension-fund (AFP) rates.
#[derive(Debug, Clone, Deserialize)]
pub struct PensionRates {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// Employee share.
    pub employee_rate: Decimal,
    /// Employer share.
    pub employer_rate: Decimal,
}

/// Contribution rates from `contributions.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributionRates {
    /// Social-security rates.
    pub social_security: SocialSecurityRates,
    /// Pension-fund rates.
    pub pension: PensionRates,
}

/// One row of the income-tax withholding table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// The bracket applies from this amount upward.
    pub lower_bound: Decimal,
    /// Marginal rate applied to the excess over `lower_bound`.
    pub rate: Decimal,
    /// Fixed amount added on top of the marginal tax.
    pub fixed_addend: Decimal,
}

/// Income-tax table from `income_tax.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomeTaxConfig {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// Brackets, any order in the file; sorted by [`StatutoryConfig::new`].
    pub brackets: Vec<TaxBracket>,
}

/// Overtime multipliers by rate type.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeMultipliers {
    /// Daytime on a working day.
    pub day: Decimal,
    /// Night-time on a working day.
    pub night: Decimal,
    /// Daytime on a public holiday.
    pub holiday_day: Decimal,
    /// Night-time on a public holiday.
    pub holiday_night: Decimal,
}

/// Maximum hours accepted in a single overtime entry.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeHourCaps {
    /// Cap for day and holiday-day entries.
    pub day: Decimal,
    /// Cap for night and holiday-night entries.
    pub night: Decimal,
}

/// Overtime configuration from `overtime.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OvertimeConfig {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// Multipliers applied to the hourly rate.
    pub multipliers: OvertimeMultipliers,
    /// Per-entry hour caps.
    pub max_hours: OvertimeHourCaps,
}

impl OvertimeConfig {
    /// Returns the hourly-rate multiplier for a rate type.
    pub fn multiplier(&self, rate_type: OvertimeRateType) -> Decimal {
        match rate_type {
            OvertimeRateType::Day => self.multipliers.day,
            OvertimeRateType::Night => self.multipliers.night,
            OvertimeRateType::HolidayDay => self.multipliers.holiday_day,
            OvertimeRateType::HolidayNight => self.multipliers.holiday_night,
        }
    }

    /// Returns the maximum hours a single entry of this rate type may carry.
    pub fn max_hours(&self, rate_type: OvertimeRateType) -> Decimal {
        if rate_type.is_night() {
            self.max_hours.night
        } else {
            self.max_hours.day
        }
    }
}

/// A month and day without a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct MonthDay {
    /// Month, 1 through 12.
    pub month: u32,
    /// Day of the month.
    pub day: u32,
}

impl MonthDay {
    /// Returns this month and day in the given year, if it exists.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }
}

/// Vacation bonus rules.
#[derive(Debug, Clone, Deserialize)]
pub struct VacationConfig {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// Minimum days since hire before the bonus is payable.
    pub min_tenure_days: i64,
    /// Days of salary the bonus is based on.
    pub days_paid: Decimal,
    /// Premium applied to those days of salary.
    pub premium_rate: Decimal,
}

/// One tenure tier of the year-end bonus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AguinaldoTier {
    /// Minimum years of service for this tier.
    pub min_years: Decimal,
    /// Days of salary paid in this tier.
    pub days: Decimal,
}

/// How the yearly aguinaldo process decides it has already run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AguinaldoIdempotence {
    /// Any aguinaldo novelty in the year blocks the whole batch.
    #[default]
    Roster,
    /// Employees already paid in the year are skipped; the rest are processed.
    Employee,
}

/// Year-end bonus rules.
#[derive(Debug, Clone, Deserialize)]
pub struct AguinaldoConfig {
    /// Reference to the governing statute.
    pub legal_ref: String,
    /// First day the process may run (inclusive).
    pub window_start: MonthDay,
    /// Last day the process may run (inclusive).
    pub window_end: MonthDay,
    /// The date tenure is measured up to.
    pub reference_date: MonthDay,
    /// Days in a year when converting days of service to years.
    pub days_per_year: Decimal,
    /// Days of salary prorated for employees with under a year of service.
    pub prorated_days: Decimal,
    /// Bonus is taxable when base salary is strictly above this amount.
    pub taxable_threshold: Decimal,
    /// Idempotence granularity.
    #[serde(default)]
    pub idempotence: AguinaldoIdempotence,
    /// Tenure tiers, any order in the file; sorted by [`StatutoryConfig::new`].
    pub tiers: Vec<AguinaldoTier>,
}

/// Payroll run options.
#[derive(Debug, Clone, Deserialize)]
pub struct PayrollRunConfig {
    /// Only employees not marked inactive take part in a run.
    pub active_only: bool,
}

/// Benefit configuration from `benefits.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct BenefitsConfig {
    /// Vacation bonus rules.
    pub vacation: VacationConfig,
    /// Year-end bonus rules.
    pub aguinaldo: AguinaldoConfig,
    /// Payroll run options.
    pub payroll: PayrollRunConfig,
}

/// The complete statutory configuration loaded from YAML files.
///
/// This struct aggregates all configuration loaded from the various
/// YAML files in a schedule configuration directory.
#[derive(Debug, Clone)]
pub struct StatutoryConfig {
    metadata: ScheduleMetadata,
    contributions: ContributionRates,
    /// Sorted highest lower bound first.
    income_tax: IncomeTaxConfig,
    overtime: OvertimeConfig,
    /// Aguinaldo tiers sorted highest minimum first.
    benefits: BenefitsConfig,
}

impl StatutoryConfig {
    /// Creates a new StatutoryConfig from its component parts.
    pub fn new(
        metadata: ScheduleMetadata,
        contributions: ContributionRates,
        income_tax: IncomeTaxConfig,
        overtime: OvertimeConfig,
        benefits: BenefitsConfig,
    ) -> Self {
        let mut income_tax = income_tax;
        income_tax
            .brackets
            .sort_by(|a, b| b.lower_bound.cmp(&a.lower_bound));
        let mut benefits = benefits;
        benefits
            .aguinaldo
            .tiers
            .sort_by(|a, b| b.min_years.cmp(&a.min_years));
        Self {
            metadata,
            contributions,
            income_tax,
            overtime,
            benefits,
        }
    }

    /// Returns the schedule metadata.
    pub fn schedule(&self) -> &ScheduleMetadata {
        &self.metadata
    }

    /// Returns the salary divisors.
    pub fn salary_basis(&self) -> &SalaryBasis {
        &self.metadata.salary_basis
    }

    /// Returns the contribution rates.
    pub fn contributions(&self) -> &ContributionRates {
        &self.contributions
    }

    /// Returns the income-tax table, highest bracket first.
    pub fn income_tax(&self) -> &IncomeTaxConfig {
        &self.income_tax
    }

    /// Returns the overtime configuration.
    pub fn overtime(&self) -> &OvertimeConfig {
        &self.overtime
    }

    /// Returns the benefit configuration.
    pub fn benefits(&self) -> &BenefitsConfig {
        &self.benefits
    }
}
