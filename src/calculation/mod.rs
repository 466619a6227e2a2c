//! Calculation logic for the payroll engine.
//!
//! This module contains all the calculation functions for computing pay:
//! statutory deductions and income tax, employer contributions, overtime
//! pricing, novelty aggregation, payslip building, payroll runs, and the
//! vacation and year-end bonus rules.

mod aguinaldo;
mod deductions;
mod employer_contributions;
mod income_tax;
mod novelty_aggregation;
mod overtime;
mod payroll_run;
mod payslip;
mod vacation;

pub use aguinaldo::{
    AguinaldoLineItem, aguinaldo_window, calculate_aguinaldo, check_aguinaldo_window,
    compute_aguinaldo_batch, confirm_aguinaldo_batch, has_aguinaldo_run,
};
pub use deductions::{DeductionResult, calculate_deductions};
pub use employer_contributions::{EmployerContributionResult, calculate_employer_contributions};
pub use income_tax::{IncomeTaxResult, calculate_income_tax};
pub use novelty_aggregation::{NoveltyAggregation, aggregate_novelties};
pub use overtime::{OvertimePayResult, calculate_overtime_pay, hourly_rate};
pub use payroll_run::{ENGINE_VERSION, compute_payroll, period_label};
pub use payslip::{build_payslip, is_aguinaldo_taxable};
pub use vacation::{
    VacationStatus, compute_vacation_bonus, is_vacation_paid, vacation_bonus_amount,
    vacation_status,
};
