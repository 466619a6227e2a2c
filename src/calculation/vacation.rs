//! Vacation bonus eligibility and calculation.
//!
//! An employee becomes eligible once their tenure reaches the configured number
//! of days and is paid at most once per calendar year. Deleting that year's
//! `vacation_pay` novelty makes the employee payable again.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NoveltyKind, NoveltyType, PayrollNovelty};

/// The vacation bonus position of one employee for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationStatus {
    /// The employee.
    pub employee_id: String,
    /// The employee's name.
    pub employee_name: String,
    /// Days of tenure on the evaluation date.
    pub tenure_days: i64,
    /// Whether the tenure requirement is met.
    pub eligible: bool,
    /// Whether the bonus has already been paid this year.
    pub paid_this_year: bool,
    /// The bonus the employee would receive.
    pub amount: Decimal,
}

/// The vacation bonus for a base salary: `base / days_per_month * days_paid * premium_rate`.
pub fn vacation_bonus_amount(base_salary: Decimal, config: &StatutoryConfig) -> Decimal {
    let vacation = &config.benefits().vacation;
    base_salary / config.salary_basis().days_per_month * vacation.days_paid * vacation.premium_rate
}

/// Returns true if a vacation bonus for the employee is dated in `year`.
pub fn is_vacation_paid(employee_id: &str, novelties: &[PayrollNovelty], year: i32) -> bool {
    novelties
        .iter()
        .any(|n| n.employee_id == employee_id && n.is_type_in_year(NoveltyType::VacationPay, year))
}

/// Summarizes an employee's vacation bonus position on `now`.
pub fn vacation_status(
    employee: &Employee,
    novelties: &[PayrollNovelty],
    now: NaiveDate,
    config: &StatutoryConfig,
) -> VacationStatus {
    let tenure_days = employee.tenure_days(now);
    VacationStatus {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        tenure_days,
        eligible: tenure_days >= config.benefits().vacation.min_tenure_days,
        paid_this_year: is_vacation_paid(&employee.id, novelties, now.year()),
        amount: vacation_bonus_amount(employee.base_salary, config),
    }
}

/// Computes the vacation bonus novelty for an employee.
///
/// The returned novelty is dated `now`; the caller commits it.
///
/// # Errors
///
/// - `AlreadyPaidThisYear` if a vacation bonus is already dated this year
/// - `NotEligible` if the employee's tenure is below the minimum
pub fn compute_vacation_bonus(
    employee: &Employee,
    novelties: &[PayrollNovelty],
    now: NaiveDate,
    config: &StatutoryConfig,
) -> EngineResult<PayrollNovelty> {
    let status = vacation_status(employee, novelties, now, config);

    if status.paid_this_year {
        return Err(EngineError::AlreadyPaidThisYear {
            benefit: "Vacation bonus".to_string(),
            employee_id: employee.id.clone(),
            year: now.year(),
        });
    }

    if !status.eligible {
        return Err(EngineError::NotEligible {
            employee_id: employee.id.clone(),
            reason: format!(
                "tenure of {} days is below the required {}",
                status.tenure_days,
                config.benefits().vacation.min_tenure_days
            ),
        });
    }

    info!(
        employee_id = %employee.id,
        amount = %status.amount.round_dp(2),
        "Vacation bonus computed"
    );

    Ok(PayrollNovelty::new(
        employee.id.clone(),
        now,
        format!("Vacation bonus {}", now.year()),
        NoveltyKind::VacationPay {
            amount: status.amount,
        },
    ))
}
