//! Payslip and payroll models.
//!
//! This module contains the [`Payslip`] type and the [`Payroll`] run that owns
//! it, together with the deduction, contribution and audit structures that a
//! payslip embeds.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Statutory deductions withheld from the employee.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeDeductions;
/// use rust_decimal::Decimal;
///
/// let deductions = EmployeeDeductions {
///     social_security: Decimal::new(2700, 2),
///     pension: Decimal::new(6525, 2),
///     income_tax: Decimal::new(5841, 2),
///     total: Decimal::new(15066, 2),
/// };
/// assert_eq!(deductions.total, Decimal::new(15066, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployeeDeductions {
    /// Employee share of social security (ISSS), capped at the salary ceiling.
    pub social_security: Decimal,
    /// Employee share of the pension fund (AFP), uncapped.
    pub pension: Decimal,
    /// Income-tax withholding, never negative.
    pub income_tax: Decimal,
    /// Sum of the three deductions.
    pub total: Decimal,
}

/// Contributions paid by the employer on top of salary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Employer share of social security (ISSS), capped at the salary ceiling.
    pub social_security: Decimal,
    /// Employer share of the pension fund (AFP), uncapped.
    pub pension: Decimal,
    /// Sum of both contributions.
    pub total: Decimal,
}

/// Per-kind sums of one employee's novelties in one period.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NoveltyTotals {
    /// Overtime pay computed from hours and rate multipliers.
    pub overtime_pay: Decimal,
    /// Vacation bonus paid in the period.
    pub vacation_pay: Decimal,
    /// Year-end bonus paid in the period.
    pub aguinaldo_pay: Decimal,
    /// Reimbursable expenses.
    pub expenses: Decimal,
    /// Unpaid-leave deductions.
    pub other_deductions: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute article behind this rule.
    pub legal_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// One employee's computed pay for one payroll run.
///
/// Immutable once created. The derived fields satisfy:
/// - `gross_pay = base_salary + overtime_pay + vacation_pay + (aguinaldo_pay if taxable)`
/// - `net_pay = total_earnings - deductions.total - other_deductions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// The employee this payslip belongs to.
    pub employee_id: String,
    /// The employee's name at run time.
    pub employee_name: String,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Overtime pay for the period.
    pub overtime_pay: Decimal,
    /// Vacation bonus for the period.
    pub vacation_pay: Decimal,
    /// Year-end bonus for the period.
    pub aguinaldo_pay: Decimal,
    /// Whether the year-end bonus counts toward taxable income.
    pub aguinaldo_is_taxable: bool,
    /// Reimbursable expenses.
    pub expenses: Decimal,
    /// Pay subject to social-security and pension contributions.
    pub social_security_base: Decimal,
    /// Taxable income for the period.
    pub gross_pay: Decimal,
    /// Statutory employee deductions.
    pub deductions: EmployeeDeductions,
    /// Unpaid-leave deductions.
    pub other_deductions: Decimal,
    /// Everything paid to the employee before deductions.
    pub total_earnings: Decimal,
    /// Take-home pay.
    pub net_pay: Decimal,
    /// Employer-side contributions.
    pub employer_contributions: EmployerContributions,
    /// This payslip's share of the payroll's total cost.
    pub employer_cost: Decimal,
    /// The ordered calculation steps that produced this payslip.
    pub audit_trace: Vec<AuditStep>,
}

/// One payroll run for one period.
///
/// The payroll exclusively owns its payslips; deleting the payroll deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payroll {
    /// Unique identifier for this run.
    pub id: Uuid,
    /// The capitalized period label, e.g. "Octubre de 2026".
    pub period: String,
    /// The date the run was executed.
    pub run_date: NaiveDate,
    /// One payslip per employee, in roster order.
    pub payslips: Vec<Payslip>,
    /// Sum of every payslip's employer cost.
    pub total_cost: Decimal,
    /// The version of the engine that performed the run.
    pub engine_version: String,
}

impl Payroll {
    /// Returns the payslip for an employee, if the run included them.
    pub fn payslip_for(&self, employee_id: &str) -> Option<&Payslip> {
        self.payslips.iter().find(|p| p.employee_id == employee_id)
    }

    /// Sum of net pay across all payslips.
    pub fn total_net_pay(&self) -> Decimal {
        self.payslips.iter().map(|p| p.net_pay).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_payslip(employee_id: &str, net_pay: &str) -> Payslip {
        Payslip {
            employee_id: employee_id.to_string(),
            employee_name: "Sample".to_string(),
            base_salary: dec("900"),
            overtime_pay: Decimal::ZERO,
            vacation_pay: Decimal::ZERO,
            aguinaldo_pay: Decimal::ZERO,
            aguinaldo_is_taxable: false,
            expenses: Decimal::ZERO,
            social_security_base: dec("900"),
            gross_pay: dec("900"),
            deductions: EmployeeDeductions::default(),
            other_deductions: Decimal::ZERO,
            total_earnings: dec("900"),
            net_pay: dec(net_pay),
            employer_contributions: EmployerContributions::default(),
            employer_cost: dec("900"),
            audit_trace: vec![],
        }
    }

    fn sample_payroll() -> Payroll {
        Payroll {
            id: Uuid::new_v4(),
            period: "Octubre de 2026".to_string(),
            run_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            payslips: vec![sample_payslip("emp_001", "800.10"), sample_payslip("emp_002", "750.40")],
            total_cost: dec("1800"),
            engine_version: "0.1.0".to_string(),
        }
    }

    #[test]
    fn test_payslip_for_finds_employee() {
        let payroll = sample_payroll();
        assert_eq!(payroll.payslip_for("emp_002").unwrap().net_pay, dec("750.40"));
        assert!(payroll.payslip_for("emp_404").is_none());
    }

    #[test]
    fn test_total_net_pay_sums_payslips() {
        assert_eq!(sample_payroll().total_net_pay(), dec("1550.50"));
    }

    #[test]
    fn test_payroll_serialization_round_trip() {
        let payroll = sample_payroll();
        let json = serde_json::to_string(&payroll).unwrap();
        let deserialized: Payroll = serde_json::from_str(&json).unwrap();
        assert_eq!(payroll, deserialized);
    }

    #[test]
    fn test_decimal_amounts_serialize_as_strings() {
        let value = serde_json::to_value(sample_payslip("emp_001", "800.10")).unwrap();
        assert_eq!(value["net_pay"], "800.10");
        assert_eq!(value["deductions"]["total"], "0");
    }
}
