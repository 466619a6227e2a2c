//! Payroll run orchestration.
//!
//! A run computes one payslip per employee for the month containing `now` and
//! bundles them into a [`Payroll`]. Either every payslip computes or no payroll
//! is produced.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, Payroll, PayrollNovelty};

use super::novelty_aggregation::aggregate_novelties;
use super::payslip::build_payslip;

/// The engine version stamped on every payroll.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the period label a run on `now` would carry.
pub fn period_label(now: NaiveDate, config: &StatutoryConfig) -> String {
    PayPeriod::from_date(now).label(config.schedule().locale)
}

/// Computes the payroll for the month containing `now`.
///
/// # Arguments
///
/// * `employees` - The roster snapshot, in the order payslips should appear
/// * `novelties` - The full novelty collection
/// * `existing_periods` - Labels of every payroll already on record
/// * `now` - The run date
/// * `config` - The statutory configuration
///
/// # Errors
///
/// - `DuplicatePeriod` if a payroll already carries this period's label
/// - `EmptyRoster` if no employee is left to pay (the active-only filter
///   applies when enabled in the configuration)
/// - `InvalidEmployee` if any employee's payslip cannot be computed
pub fn compute_payroll(
    employees: &[Employee],
    novelties: &[PayrollNovelty],
    existing_periods: &[String],
    now: NaiveDate,
    config: &StatutoryConfig,
) -> EngineResult<Payroll> {
    let pay_period = PayPeriod::from_date(now);
    let period = pay_period.label(config.schedule().locale);

    if existing_periods.iter().any(|p| *p == period) {
        return Err(EngineError::DuplicatePeriod { period });
    }

    let active_only = config.benefits().payroll.active_only;
    let roster: Vec<&Employee> = employees
        .iter()
        .filter(|e| !active_only || e.is_active())
        .collect();

    if roster.is_empty() {
        return Err(EngineError::EmptyRoster);
    }

    debug!(
        period = %period,
        roster = roster.len(),
        skipped = employees.len() - roster.len(),
        "Computing payroll"
    );

    let payslips = roster
        .into_iter()
        .map(|employee| {
            let aggregation = aggregate_novelties(employee, novelties, &pay_period, config, 1);
            build_payslip(employee, aggregation, config)
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_cost: Decimal = payslips.iter().map(|p| p.employer_cost).sum();

    info!(
        period = %period,
        payslips = payslips.len(),
        total_cost = %total_cost.round_dp(2),
        "Payroll computed"
    );

    Ok(Payroll {
        id: Uuid::new_v4(),
        period,
        run_date: now,
        payslips,
        total_cost,
        engine_version: ENGINE_VERSION.to_string(),
    })
}
