//! Employee model and related types.
//!
//! This module defines the Employee struct together with the ContractType
//! and EmployeeStatus enums. The engine treats employees as read-only input.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractType {
    /// Salary agreed per month.
    #[serde(alias = "mensual")]
    Monthly,
    /// Salary agreed per day.
    #[serde(alias = "diario")]
    Daily,
    /// Salary agreed per hour.
    #[serde(alias = "por_hora")]
    Hourly,
}

/// Whether the employee takes part in payroll runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Included in payroll runs.
    Active,
    /// Excluded from payroll runs.
    Inactive,
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Full name.
    pub name: String,
    /// National identity document (DUI).
    pub dui: String,
    /// Tax identification number (NIT).
    pub nit: String,
    /// Social-security affiliation number (ISSS).
    pub isss: String,
    /// Pension-account number (NUP).
    pub nup: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Free-form description of the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// The contract arrangement.
    pub contract_type: ContractType,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The date employment ended, if it has.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub termination_date: Option<NaiveDate>,
    /// Pension-fund administrator name (informational).
    pub afp_type: String,
    /// Payroll status; absence means active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

impl Employee {
    /// Returns true unless the employee is explicitly marked inactive.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{ContractType, Employee, EmployeeStatus};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Ana Morales".to_string(),
    ///     dui: "01234567-8".to_string(),
    ///     nit: "0101-150392-101-1".to_string(),
    ///     isss: "123456789".to_string(),
    ///     nup: "9876543210".to_string(),
    ///     position: "Developer".to_string(),
    ///     job_description: None,
    ///     base_salary: Decimal::new(900, 0),
    ///     contract_type: ContractType::Monthly,
    ///     hire_date: NaiveDate::from_ymd_opt(2022, 3, 15).unwrap(),
    ///     termination_date: None,
    ///     afp_type: "Confia".to_string(),
    ///     status: None,
    /// };
    /// assert!(employee.is_active());
    ///
    /// employee.status = Some(EmployeeStatus::Inactive);
    /// assert!(!employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status != Some(EmployeeStatus::Inactive)
    }

    /// Whole days elapsed from the hire date to `on`. Negative before hire.
    pub fn tenure_days(&self, on: NaiveDate) -> i64 {
        (on - self.hire_date).num_days()
    }

    /// The salary for one day given the number of days in a payroll month.
    pub fn daily_salary(&self, days_per_month: Decimal) -> Decimal {
        self.base_salary / days_per_month
    }
}
