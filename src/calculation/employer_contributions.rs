//! Employer-side social-security and pension contributions.

use rust_decimal::Decimal;

use crate::config::ContributionRates;
use crate::models::{AuditStep, EmployerContributions};

/// The result of calculating employer contributions, including the audit step.
#[derive(Debug, Clone)]
pub struct EmployerContributionResult {
    /// The contribution breakdown and total.
    pub contributions: EmployerContributions,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the employer's contributions on the social-security base pay.
///
/// The base excludes the year-end bonus. Social security is capped at the
/// salary ceiling; pension is not.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_employer_contributions;
/// use payroll_engine::config::{ContributionRates, PensionRates, SocialSecurityRates};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let rates = ContributionRates {
///     social_security: SocialSecurityRates {
///         legal_ref: "LSS".to_string(),
///         employee_rate: dec("0.03"),
///         employer_rate: dec("0.075"),
///         salary_ceiling: dec("1000"),
///     },
///     pension: PensionRates {
///         legal_ref: "LSP".to_string(),
///         employee_rate: dec("0.0725"),
///         employer_rate: dec("0.0875"),
///     },
/// };
///
/// let result = calculate_employer_contributions(dec("1200"), &rates, 1);
/// assert_eq!(result.contributions.social_security, dec("75"));
/// assert_eq!(result.contributions.pension, dec("105"));
/// assert_eq!(result.contributions.total, dec("180"));
/// ```
pub fn calculate_employer_contributions(
    social_security_base_pay: Decimal,
    rates: &ContributionRates,
    step_number: u32,
) -> EmployerContributionResult {
    let ceiling = rates.social_security.salary_ceiling;
    let capped = social_security_base_pay.min(ceiling);

    let social_security = capped * rates.social_security.employer_rate;
    let pension = social_security_base_pay * rates.pension.employer_rate;
    let total = social_security + pension;

    let audit_step = AuditStep {
        step_number,
        rule_id: "employer_contributions".to_string(),
        rule_name: "Employer ISSS and AFP Contributions".to_string(),
        legal_ref: format!(
            "{}; {}",
            rates.social_security.legal_ref, rates.pension.legal_ref
        ),
        input: serde_json::json!({
            "social_security_base_pay": social_security_base_pay.normalize().to_string(),
            "salary_ceiling": ceiling.normalize().to_string()
        }),
        output: serde_json::json!({
            "social_security": social_security.normalize().to_string(),
            "pension": pension.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "ISSS ${} x {} + AFP ${} x {} = ${}",
            capped.normalize(),
            rates.social_security.employer_rate.normalize(),
            social_security_base_pay.normalize(),
            rates.pension.employer_rate.normalize(),
            total.normalize()
        ),
    };

    EmployerContributionResult {
        contributions: EmployerContributions {
            social_security,
            pension,
            total,
        },
        audit_step,
    }
}
