//! Year-end bonus (aguinaldo).
//!
//! The yearly process runs inside a fixed date window. Tenure is measured up to
//! the reference date of the current year and converted to years of service;
//! the highest tier reached sets the days of salary paid. Employees with under
//! a year of service receive a prorated share for the days worked this year.
//!
//! Computing a batch produces line items only. Confirming turns them into
//! `aguinaldo` novelties that the next payroll run picks up.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{AguinaldoIdempotence, MonthDay, StatutoryConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NoveltyKind, NoveltyType, PayrollNovelty};

use super::payslip::is_aguinaldo_taxable;

/// One employee's year-end bonus, before it is committed as a novelty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AguinaldoLineItem {
    /// The employee.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// Monthly base salary used for the calculation.
    pub base_salary: Decimal,
    /// Days of service up to the reference date divided by the days per year.
    pub years_of_service: Decimal,
    /// Days of salary paid, or `None` when the amount is prorated.
    #[serde(default)]
    pub days_to_pay: Option<Decimal>,
    /// The bonus amount.
    pub amount: Decimal,
    /// Whether the bonus counts toward taxable income.
    pub is_taxable: bool,
}

fn resolve(month_day: &MonthDay, year: i32, name: &str) -> EngineResult<NaiveDate> {
    month_day
        .in_year(year)
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "aguinaldo {} {}/{} does not exist in {}",
                name, month_day.month, month_day.day, year
            ),
        })
}

/// Returns the inclusive window in which the process may run in `year`.
pub fn aguinaldo_window(year: i32, config: &StatutoryConfig) -> EngineResult<(NaiveDate, NaiveDate)> {
    let aguinaldo = &config.benefits().aguinaldo;
    Ok((
        resolve(&aguinaldo.window_start, year, "window start")?,
        resolve(&aguinaldo.window_end, year, "window end")?,
    ))
}

/// Fails with `OutsideDateWindow` unless `now` falls inside this year's window.
pub fn check_aguinaldo_window(now: NaiveDate, config: &StatutoryConfig) -> EngineResult<()> {
    let (start, end) = aguinaldo_window(now.year(), config)?;
    if now < start || now > end {
        return Err(EngineError::OutsideDateWindow {
            date: now,
            start,
            end,
        });
    }
    Ok(())
}

/// Returns true if any aguinaldo novelty, for any employee, is dated in `year`.
pub fn has_aguinaldo_run(novelties: &[PayrollNovelty], year: i32) -> bool {
    novelties
        .iter()
        .any(|n| n.is_type_in_year(NoveltyType::Aguinaldo, year))
}

fn employees_paid_in(novelties: &[PayrollNovelty], year: i32) -> HashSet<&str> {
    novelties
        .iter()
        .filter(|n| n.is_type_in_year(NoveltyType::Aguinaldo, year))
        .map(|n| n.employee_id.as_str())
        .collect()
}

/// Calculates one employee's year-end bonus for `year`.
///
/// A hire date after the reference date counts as zero days of service.
pub fn calculate_aguinaldo(
    employee: &Employee,
    year: i32,
    config: &StatutoryConfig,
) -> EngineResult<AguinaldoLineItem> {
    let aguinaldo = &config.benefits().aguinaldo;
    let reference = resolve(&aguinaldo.reference_date, year, "reference date")?;

    let days_of_service = (reference - employee.hire_date).num_days().max(0);
    let years_of_service = Decimal::from(days_of_service) / aguinaldo.days_per_year;
    let daily_salary = employee.daily_salary(config.salary_basis().days_per_month);

    let tier = aguinaldo
        .tiers
        .iter()
        .find(|t| years_of_service >= t.min_years);

    let (days_to_pay, amount) = match tier {
        Some(t) => (Some(t.days), daily_salary * t.days),
        None => {
            let start_of_year = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| {
                EngineError::CalculationError {
                    message: format!("invalid year {}", year),
                }
            })?;
            let worked_from = employee.hire_date.max(start_of_year);
            let days_worked = (reference - worked_from).num_days().max(0);
            let amount = daily_salary * aguinaldo.prorated_days / aguinaldo.days_per_year
                * Decimal::from(days_worked);
            (None, amount)
        }
    };

    Ok(AguinaldoLineItem {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        base_salary: employee.base_salary,
        years_of_service,
        days_to_pay,
        amount,
        is_taxable: is_aguinaldo_taxable(employee.base_salary, config),
    })
}

/// Computes the year-end bonus line items for the active roster.
///
/// With roster idempotence, any aguinaldo already dated this year blocks the
/// whole batch. With employee idempotence, employees already paid are skipped.
///
/// # Errors
///
/// - `OutsideDateWindow` if `now` is outside the yearly window
/// - `AlreadyRunThisYear` if the process has already run (or, per employee,
///   nobody is left to pay)
pub fn compute_aguinaldo_batch(
    employees: &[Employee],
    novelties: &[PayrollNovelty],
    now: NaiveDate,
    config: &StatutoryConfig,
) -> EngineResult<Vec<AguinaldoLineItem>> {
    check_aguinaldo_window(now, config)?;
    let year = now.year();

    let already_paid = employees_paid_in(novelties, year);
    if config.benefits().aguinaldo.idempotence == AguinaldoIdempotence::Roster
        && !already_paid.is_empty()
    {
        return Err(EngineError::AlreadyRunThisYear { year });
    }

    let items = employees
        .iter()
        .filter(|e| e.is_active() && !already_paid.contains(e.id.as_str()))
        .map(|e| calculate_aguinaldo(e, year, config))
        .collect::<EngineResult<Vec<_>>>()?;

    if items.is_empty() && !already_paid.is_empty() {
        return Err(EngineError::AlreadyRunThisYear { year });
    }

    info!(year, employees = items.len(), "Aguinaldo batch computed");
    Ok(items)
}

/// Turns previewed line items into aguinaldo novelties dated `now`.
///
/// # Errors
///
/// - `OutsideDateWindow` if `now` is outside the yearly window
/// - `AlreadyRunThisYear` under roster idempotence if any aguinaldo exists this year
/// - `AlreadyPaidThisYear` if an employee already holds an aguinaldo this year
///   or appears twice in the batch
pub fn confirm_aguinaldo_batch(
    items: &[AguinaldoLineItem],
    novelties: &[PayrollNovelty],
    now: NaiveDate,
    config: &StatutoryConfig,
) -> EngineResult<Vec<PayrollNovelty>> {
    check_aguinaldo_window(now, config)?;
    let year = now.year();

    let mut paid = employees_paid_in(novelties, year);
    if config.benefits().aguinaldo.idempotence == AguinaldoIdempotence::Roster && !paid.is_empty() {
        return Err(EngineError::AlreadyRunThisYear { year });
    }

    let mut confirmed = Vec::with_capacity(items.len());
    for item in items {
        if !paid.insert(item.employee_id.as_str()) {
            warn!(employee_id = %item.employee_id, year, "Aguinaldo already paid");
            return Err(EngineError::AlreadyPaidThisYear {
                benefit: "Aguinaldo".to_string(),
                employee_id: item.employee_id.clone(),
                year,
            });
        }
        confirmed.push(PayrollNovelty::new(
            item.employee_id.clone(),
            now,
            format!("Aguinaldo {}", year),
            NoveltyKind::Aguinaldo {
                amount: item.amount,
            },
        ));
    }

    info!(year, novelties = confirmed.len(), "Aguinaldo batch confirmed");
    Ok(confirmed)
}
