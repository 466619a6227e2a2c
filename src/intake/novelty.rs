//! Manual novelty intake.
//!
//! Only overtime, expenses and unpaid leave are entered by hand. Vacation and
//! aguinaldo novelties come from the benefit rules and have no request form.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NoveltyKind, OvertimeRateType, PayrollNovelty};

/// The type-specific part of a manual novelty request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoveltyInput {
    /// Overtime hours; the amount is priced at payroll time.
    Overtime {
        /// Hours worked.
        overtime_hours: Decimal,
        /// The rate class the hours are paid at.
        overtime_rate_type: OvertimeRateType,
    },
    /// A reimbursable expense.
    Expense {
        /// The amount to reimburse.
        amount: Decimal,
        /// What the expense was for.
        #[serde(default)]
        description: String,
    },
    /// One or two days of unpaid leave.
    UnpaidLeave {
        /// Days of leave.
        unpaid_leave_days: u32,
    },
}

/// A manual novelty as submitted by a user.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoveltyRequest {
    /// The employee the novelty applies to.
    pub employee_id: String,
    /// The date the novelty took place.
    pub date: NaiveDate,
    /// The type-specific fields.
    #[serde(flatten)]
    pub input: NoveltyInput,
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidNovelty {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Validates a manual novelty request and builds the novelty to store.
///
/// # Errors
///
/// - `EmployeeNotFound` if the employee is not on the roster
/// - `InvalidNovelty` naming the offending field otherwise
pub fn prepare_novelty(
    request: NoveltyRequest,
    employees: &[Employee],
    today: NaiveDate,
    config: &StatutoryConfig,
) -> EngineResult<PayrollNovelty> {
    let employee = employees
        .iter()
        .find(|e| e.id == request.employee_id)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            id: request.employee_id.clone(),
        })?;

    if request.date > today {
        return Err(invalid("date", "the date cannot be in the future"));
    }

    let (description, kind) = match request.input {
        NoveltyInput::Overtime {
            overtime_hours,
            overtime_rate_type,
        } => {
            if overtime_hours <= Decimal::ZERO {
                return Err(invalid("overtime_hours", "hours must be greater than zero"));
            }
            let cap = config.overtime().max_hours(overtime_rate_type);
            if overtime_hours > cap {
                let shift = if overtime_rate_type.is_night() { "night" } else { "day" };
                return Err(invalid(
                    "overtime_hours",
                    format!("{} overtime cannot exceed {} hours", shift, cap.normalize()),
                ));
            }
            (
                format!(
                    "{} hrs extra ({})",
                    overtime_hours.normalize(),
                    overtime_rate_type.label()
                ),
                NoveltyKind::Overtime {
                    overtime_hours,
                    overtime_rate_type,
                },
            )
        }
        NoveltyInput::Expense {
            amount,
            description,
        } => {
            if amount <= Decimal::ZERO {
                return Err(invalid("amount", "amount must be greater than zero"));
            }
            let description = description.trim().to_string();
            if description.is_empty() {
                return Err(invalid("description", "a reason is required"));
            }
            (description, NoveltyKind::Expense { amount })
        }
        NoveltyInput::UnpaidLeave { unpaid_leave_days } => {
            if !(1..=2).contains(&unpaid_leave_days) {
                return Err(invalid("unpaid_leave_days", "leave must be 1 or 2 days"));
            }
            let amount = employee.daily_salary(config.salary_basis().days_per_month)
                * Decimal::from(unpaid_leave_days);
            let unit = if unpaid_leave_days == 1 { "day" } else { "days" };
            (
                format!("{} {} of unpaid leave", unpaid_leave_days, unit),
                NoveltyKind::UnpaidLeave {
                    amount,
                    unpaid_leave_days: Some(unpaid_leave_days),
                },
            )
        }
    };

    Ok(PayrollNovelty::new(
        employee.id.clone(),
        request.date,
        description,
        kind,
    ))
}
