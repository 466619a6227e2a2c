//! Payslip building.
//!
//! This module turns one employee's aggregated novelties into a [`Payslip`],
//! calling the deduction and employer-contribution calculators along the way.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Employee, Payslip};

use super::deductions::calculate_deductions;
use super::employer_contributions::calculate_employer_contributions;
use super::novelty_aggregation::NoveltyAggregation;

/// Returns true if a year-end bonus paid at this base salary is taxable.
///
/// The comparison is strict: a salary exactly at the threshold is not taxable.
pub fn is_aguinaldo_taxable(base_salary: Decimal, config: &StatutoryConfig) -> bool {
    base_salary > config.benefits().aguinaldo.taxable_threshold
}

/// Builds the payslip for one employee from their aggregated novelties.
///
/// The audit trace continues the numbering of the aggregation steps.
///
/// # Errors
///
/// Returns `InvalidEmployee` if the base salary is not positive.
pub fn build_payslip(
    employee: &Employee,
    aggregation: NoveltyAggregation,
    config: &StatutoryConfig,
) -> EngineResult<Payslip> {
    if employee.base_salary <= Decimal::ZERO {
        return Err(EngineError::InvalidEmployee {
            field: "base_salary".to_string(),
            message: format!(
                "employee {} has non-positive base salary {}",
                employee.id, employee.base_salary
            ),
        });
    }

    let totals = aggregation.totals;
    let mut audit_trace = aggregation.audit_steps;
    let mut step_number = audit_trace.last().map_or(1, |s| s.step_number + 1);

    let base_salary = employee.base_salary;
    // Aguinaldo never enters the social-security base.
    let social_security_base = base_salary + totals.overtime_pay + totals.vacation_pay;
    let aguinaldo_is_taxable = is_aguinaldo_taxable(base_salary, config);
    let taxable_aguinaldo = if aguinaldo_is_taxable {
        totals.aguinaldo_pay
    } else {
        Decimal::ZERO
    };
    let gross_pay = social_security_base + taxable_aguinaldo;

    audit_trace.push(AuditStep {
        step_number,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Taxable Pay".to_string(),
        legal_ref: config.benefits().aguinaldo.legal_ref.clone(),
        input: serde_json::json!({
            "base_salary": base_salary.normalize().to_string(),
            "overtime_pay": totals.overtime_pay.round_dp(4).normalize().to_string(),
            "vacation_pay": totals.vacation_pay.normalize().to_string(),
            "aguinaldo_pay": totals.aguinaldo_pay.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_security_base": social_security_base.round_dp(4).normalize().to_string(),
            "aguinaldo_is_taxable": aguinaldo_is_taxable,
            "gross_pay": gross_pay.round_dp(4).normalize().to_string()
        }),
        reasoning: if aguinaldo_is_taxable {
            format!(
                "Base salary ${} exceeds ${}: aguinaldo included in taxable pay",
                base_salary.normalize(),
                config.benefits().aguinaldo.taxable_threshold.normalize()
            )
        } else {
            "Aguinaldo excluded from taxable pay".to_string()
        },
    });
    step_number += 1;

    let deduction_result = calculate_deductions(gross_pay, config, step_number);
    step_number += deduction_result.audit_steps.len() as u32;
    audit_trace.extend(deduction_result.audit_steps);
    let deductions = deduction_result.deductions;

    let employer_result =
        calculate_employer_contributions(social_security_base, config.contributions(), step_number);
    step_number += 1;
    audit_trace.push(employer_result.audit_step);
    let employer_contributions = employer_result.contributions;

    let total_earnings = social_security_base + totals.aguinaldo_pay + totals.expenses;
    let net_pay = total_earnings - deductions.total - totals.other_deductions;
    // The bonus is added back to cost even though it carries no contributions.
    let employer_cost = social_security_base + employer_contributions.total + totals.aguinaldo_pay;

    audit_trace.push(AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        legal_ref: String::new(),
        input: serde_json::json!({
            "total_earnings": total_earnings.round_dp(4).normalize().to_string(),
            "deductions_total": deductions.total.round_dp(4).normalize().to_string(),
            "other_deductions": totals.other_deductions.normalize().to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.round_dp(4).normalize().to_string(),
            "employer_cost": employer_cost.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "${} - ${} - ${} = ${}",
            total_earnings.round_dp(2),
            deductions.total.round_dp(2),
            totals.other_deductions.round_dp(2),
            net_pay.round_dp(2)
        ),
    });

    Ok(Payslip {
        employee_id: employee.id.clone(),
        employee_name: employee.name.clone(),
        base_salary,
        overtime_pay: totals.overtime_pay,
        vacation_pay: totals.vacation_pay,
        aguinaldo_pay: totals.aguinaldo_pay,
        aguinaldo_is_taxable,
        expenses: totals.expenses,
        social_security_base,
        gross_pay,
        deductions,
        other_deductions: totals.other_deductions,
        total_earnings,
        net_pay,
        employer_contributions,
        employer_cost,
        audit_trace,
    })
}
