//! Statutory employee deductions.
//!
//! This module computes the employee's social-security (ISSS) and pension (AFP)
//! withholdings and the income tax on what remains.

use rust_decimal::Decimal;

use crate::config::StatutoryConfig;
use crate::models::{AuditStep, EmployeeDeductions};

use super::income_tax::calculate_income_tax;

/// The result of calculating employee deductions, including audit steps.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The deduction breakdown and total.
    pub deductions: EmployeeDeductions,
    /// Audit steps in order: contributions, then income tax.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates statutory deductions from gross taxable pay.
///
/// - social security = `min(gross, ceiling) * employee_rate`
/// - pension = `gross * employee_rate` (no cap)
/// - income tax on `gross - social security - pension`
///
/// No rounding is applied; amounts are rounded only for presentation.
///
/// # Examples
///
/// ```no_run
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/sv").unwrap();
/// let result = calculate_deductions(Decimal::new(900, 0), loader.config(), 1);
/// assert_eq!(result.deductions.social_security, Decimal::new(27, 0));
/// ```
pub fn calculate_deductions(
    gross_taxable_pay: Decimal,
    config: &StatutoryConfig,
    step_number: u32,
) -> DeductionResult {
    let rates = config.contributions();
    let ceiling = rates.social_security.salary_ceiling;
    let ss_base = gross_taxable_pay.min(ceiling);

    let social_security = ss_base * rates.social_security.employee_rate;
    let pension = gross_taxable_pay * rates.pension.employee_rate;
    let taxable_after_ss_pension = gross_taxable_pay - social_security - pension;

    let contributions_step = AuditStep {
        step_number,
        rule_id: "employee_contributions".to_string(),
        rule_name: "Employee ISSS and AFP Withholding".to_string(),
        legal_ref: format!(
            "{}; {}",
            rates.social_security.legal_ref, rates.pension.legal_ref
        ),
        input: serde_json::json!({
            "gross_taxable_pay": gross_taxable_pay.normalize().to_string(),
            "salary_ceiling": ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_security": social_security.normalize().to_string(),
            "pension": pension.normalize().to_string(),
            "ceiling_applied": gross_taxable_pay > ceiling,
            "taxable_after_ss_pension": taxable_after_ss_pension.normalize().to_string()
        }),
        reasoning: format!(
            "ISSS ${} x {} = ${}; AFP ${} x {} = ${}",
            ss_base.normalize(),
            rates.social_security.employee_rate.normalize(),
            social_security.normalize(),
            gross_taxable_pay.normalize(),
            rates.pension.employee_rate.normalize(),
            pension.normalize()
        ),
    };

    let income_tax = calculate_income_tax(
        taxable_after_ss_pension,
        config.income_tax(),
        step_number + 1,
    );

    let total = social_security + pension + income_tax.tax;

    DeductionResult {
        deductions: EmployeeDeductions {
            social_security,
            pension,
            income_tax: income_tax.tax,
            total,
        },
        audit_steps: vec![contributions_step, income_tax.audit_step],
    }
}
