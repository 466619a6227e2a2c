//! Payroll novelty model.
//!
//! A novelty is one dated adjustment to one employee's pay: overtime worked,
//! a reimbursable expense, unpaid leave, or a benefit payment. Novelties are
//! never mutated after creation; they are only deleted.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayPeriod;

/// The rate class an overtime entry is paid at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeRateType {
    /// Daytime overtime on a working day.
    Day,
    /// Night-time overtime on a working day.
    Night,
    /// Daytime overtime on a public holiday.
    HolidayDay,
    /// Night-time overtime on a public holiday.
    HolidayNight,
}

impl OvertimeRateType {
    /// Returns true for the two night-time rate types.
    pub fn is_night(&self) -> bool {
        matches!(self, Self::Night | Self::HolidayNight)
    }

    /// A short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
            Self::HolidayDay => "holiday day",
            Self::HolidayNight => "holiday night",
        }
    }
}

/// The kind of a novelty, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoveltyType {
    /// Overtime hours.
    Overtime,
    /// Reimbursable expense.
    Expense,
    /// Unpaid leave deduction.
    UnpaidLeave,
    /// Yearly vacation bonus.
    VacationPay,
    /// Year-end bonus.
    Aguinaldo,
}

/// The type-specific payload of a novelty.
///
/// Serialized with an inline `type` tag, so a novelty reads as
/// `{"type": "overtime", "overtime_hours": "4", "overtime_rate_type": "day", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoveltyKind {
    /// Overtime worked, paid from the hourly rate.
    Overtime {
        /// Number of overtime hours.
        overtime_hours: Decimal,
        /// The rate class the hours are paid at.
        overtime_rate_type: OvertimeRateType,
    },
    /// A reimbursable expense, paid on top of earnings and never taxed.
    Expense {
        /// The amount to reimburse.
        amount: Decimal,
    },
    /// Unpaid leave, deducted from net pay.
    UnpaidLeave {
        /// The amount to deduct.
        amount: Decimal,
        /// Days of leave the amount was derived from.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        unpaid_leave_days: Option<u32>,
    },
    /// Yearly vacation bonus.
    VacationPay {
        /// The bonus amount.
        amount: Decimal,
    },
    /// Year-end bonus.
    Aguinaldo {
        /// The bonus amount.
        amount: Decimal,
    },
}

impl NoveltyKind {
    /// Returns the payload-free type of this kind.
    pub fn novelty_type(&self) -> NoveltyType {
        match self {
            Self::Overtime { .. } => NoveltyType::Overtime,
            Self::Expense { .. } => NoveltyType::Expense,
            Self::UnpaidLeave { .. } => NoveltyType::UnpaidLeave,
            Self::VacationPay { .. } => NoveltyType::VacationPay,
            Self::Aguinaldo { .. } => NoveltyType::Aguinaldo,
        }
    }

    /// The monetary amount carried by the payload, if any.
    ///
    /// Overtime carries hours rather than an amount.
    pub fn amount(&self) -> Option<Decimal> {
        match self {
            Self::Overtime { .. } => None,
            Self::Expense { amount }
            | Self::UnpaidLeave { amount, .. }
            | Self::VacationPay { amount }
            | Self::Aguinaldo { amount } => Some(*amount),
        }
    }
}

/// One dated payroll adjustment tied to one employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{NoveltyKind, NoveltyType, OvertimeRateType, PayrollNovelty};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let novelty = PayrollNovelty::new(
///     "emp_001",
///     NaiveDate::from_ymd_opt(2026, 10, 5).unwrap(),
///     "4 hrs extra (day)",
///     NoveltyKind::Overtime {
///         overtime_hours: Decimal::new(4, 0),
///         overtime_rate_type: OvertimeRateType::Day,
///     },
/// );
/// assert_eq!(novelty.novelty_type(), NoveltyType::Overtime);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollNovelty {
    /// Unique identifier of the novelty.
    pub id: Uuid,
    /// The employee the novelty applies to.
    pub employee_id: String,
    /// The date the novelty took place; never in the future.
    pub date: NaiveDate,
    /// A human-readable description.
    #[serde(default)]
    pub description: String,
    /// The type-specific payload.
    #[serde(flatten)]
    pub kind: NoveltyKind,
}

impl PayrollNovelty {
    /// Creates a novelty with a fresh identifier.
    pub fn new(
        employee_id: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        kind: NoveltyKind,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            date,
            description: description.into(),
            kind,
        }
    }

    /// Returns the payload-free type of this novelty.
    pub fn novelty_type(&self) -> NoveltyType {
        self.kind.novelty_type()
    }

    /// Returns true if this novelty belongs to the employee and period.
    pub fn applies_to(&self, employee_id: &str, period: &PayPeriod) -> bool {
        self.employee_id == employee_id && period.contains_date(self.date)
    }

    /// Returns true if this novelty has the given type and is dated in `year`.
    pub fn is_type_in_year(&self, novelty_type: NoveltyType, year: i32) -> bool {
        self.novelty_type() == novelty_type && self.date.year() == year
    }
}
