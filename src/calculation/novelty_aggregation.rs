//! Novelty aggregation.
//!
//! This module filters the full novelty collection down to one employee and one
//! period and reduces it by kind. Every matching novelty counts; several
//! novelties of the same kind in a period are summed.

use crate::config::StatutoryConfig;
use crate::models::{AuditStep, Employee, NoveltyKind, NoveltyTotals, PayPeriod, PayrollNovelty};

use super::overtime::calculate_overtime_pay;

/// The aggregated novelty sums for one employee and period.
#[derive(Debug, Clone)]
pub struct NoveltyAggregation {
    /// Per-kind sums.
    pub totals: NoveltyTotals,
    /// Number of novelties that fell in the period.
    pub novelty_count: usize,
    /// One step per overtime entry, then a summary step.
    pub audit_steps: Vec<AuditStep>,
}

/// Aggregates an employee's novelties for a period.
///
/// Novelties belonging to other employees or dated outside the period are
/// ignored. Overtime is priced from the employee's base salary.
///
/// # Arguments
///
/// * `employee` - The employee to aggregate for
/// * `novelties` - The full novelty collection
/// * `period` - The month to aggregate
/// * `config` - The statutory configuration (overtime multipliers, salary basis)
/// * `step_number` - The first step number for the audit trail
pub fn aggregate_novelties(
    employee: &Employee,
    novelties: &[PayrollNovelty],
    period: &PayPeriod,
    config: &StatutoryConfig,
    step_number: u32,
) -> NoveltyAggregation {
    let mut totals = NoveltyTotals::default();
    let mut audit_steps = Vec::new();
    let mut next_step = step_number;
    let mut novelty_count = 0;

    for novelty in novelties
        .iter()
        .filter(|n| n.applies_to(&employee.id, period))
    {
        novelty_count += 1;
        match &novelty.kind {
            NoveltyKind::Overtime {
                overtime_hours,
                overtime_rate_type,
            } => {
                let priced = calculate_overtime_pay(
                    *overtime_hours,
                    *overtime_rate_type,
                    employee.base_salary,
                    config,
                    next_step,
                );
                totals.overtime_pay += priced.amount;
                audit_steps.push(priced.audit_step);
                next_step += 1;
            }
            NoveltyKind::Expense { amount } => totals.expenses += *amount,
            NoveltyKind::UnpaidLeave { amount, .. } => totals.other_deductions += *amount,
            NoveltyKind::VacationPay { amount } => totals.vacation_pay += *amount,
            NoveltyKind::Aguinaldo { amount } => totals.aguinaldo_pay += *amount,
        }
    }

    audit_steps.push(AuditStep {
        step_number: next_step,
        rule_id: "novelty_aggregation".to_string(),
        rule_name: "Novelty Aggregation".to_string(),
        legal_ref: String::new(),
        input: serde_json::json!({
            "employee_id": employee.id,
            "year": period.year,
            "month": period.month,
            "novelties_in_period": novelty_count
        }),
        output: serde_json::json!({
            "overtime_pay": totals.overtime_pay.round_dp(4).normalize().to_string(),
            "vacation_pay": totals.vacation_pay.normalize().to_string(),
            "aguinaldo_pay": totals.aguinaldo_pay.normalize().to_string(),
            "expenses": totals.expenses.normalize().to_string(),
            "other_deductions": totals.other_deductions.normalize().to_string()
        }),
        reasoning: if novelty_count == 0 {
            format!("No novelties for {}/{}", period.month, period.year)
        } else {
            format!(
                "{} novelties summed for {}/{}",
                novelty_count, period.month, period.year
            )
        },
    });

    NoveltyAggregation {
        totals,
        novelty_count,
        audit_steps,
    }
}
