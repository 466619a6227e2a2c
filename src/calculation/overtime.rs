//! Overtime pay calculation.
//!
//! Overtime is paid from an hourly rate derived from the monthly base salary:
//! `base_salary / days_per_month / hours_per_day`, multiplied by the rate
//! type's multiplier.

use rust_decimal::Decimal;

use crate::config::{SalaryBasis, StatutoryConfig};
use crate::models::{AuditStep, OvertimeRateType};

/// The result of pricing one overtime entry, including the audit step.
#[derive(Debug, Clone)]
pub struct OvertimePayResult {
    /// The amount payable for the entry.
    pub amount: Decimal,
    /// The hourly rate the entry was priced from.
    pub hourly_rate: Decimal,
    /// The multiplier applied for the rate type.
    pub multiplier: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the hourly rate for a monthly base salary.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::hourly_rate;
/// use payroll_engine::config::SalaryBasis;
/// use rust_decimal::Decimal;
///
/// let basis = SalaryBasis {
///     days_per_month: Decimal::new(30, 0),
///     hours_per_day: Decimal::new(8, 0),
/// };
/// assert_eq!(hourly_rate(Decimal::new(960, 0), &basis), Decimal::new(4, 0));
/// ```
pub fn hourly_rate(base_salary: Decimal, basis: &SalaryBasis) -> Decimal {
    base_salary / basis.days_per_month / basis.hours_per_day
}

/// Prices one overtime entry: `hours * hourly_rate * multiplier`.
pub fn calculate_overtime_pay(
    hours: Decimal,
    rate_type: OvertimeRateType,
    base_salary: Decimal,
    config: &StatutoryConfig,
    step_number: u32,
) -> OvertimePayResult {
    let hourly_rate = hourly_rate(base_salary, config.salary_basis());
    let multiplier = config.overtime().multiplier(rate_type);
    let amount = hours * hourly_rate * multiplier;

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_pay".to_string(),
        rule_name: "Overtime Pay".to_string(),
        legal_ref: config.overtime().legal_ref.clone(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "rate_type": rate_type,
            "base_salary": base_salary.normalize().to_string()
        }),
        output: serde_json::json!({
            "hourly_rate": hourly_rate.round_dp(4).normalize().to_string(),
            "multiplier": multiplier.normalize().to_string(),
            "amount": amount.round_dp(4).normalize().to_string()
        }),
        reasoning: format!(
            "{}h x ${} x {} ({}) = ${}",
            hours.normalize(),
            hourly_rate.round_dp(4).normalize(),
            multiplier.normalize(),
            rate_type.label(),
            amount.round_dp(2)
        ),
    };

    OvertimePayResult {
        amount,
        hourly_rate,
        multiplier,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, test_config};

    #[test]
    fn test_day_overtime_for_1600_salary() {
        let result =
            calculate_overtime_pay(dec("4"), OvertimeRateType::Day, dec("1600"), &test_config(), 1);
        assert_eq!(result.multiplier, dec("2.0"));
        assert_eq!(result.hourly_rate.round_dp(4), dec("6.6667"));
        assert_eq!(result.amount.round_dp(2), dec("53.33"));
    }

    #[test]
    fn test_multipliers_by_rate_type() {
        // 960 / 30 / 8 = 4.00 per hour
        let config = test_config();
        let price = |rate_type| calculate_overtime_pay(dec("2"), rate_type, dec("960"), &config, 1).amount;

        assert_eq!(price(OvertimeRateType::Day), dec("16"));
        assert_eq!(price(OvertimeRateType::Night), dec("18"));
        assert_eq!(price(OvertimeRateType::HolidayDay), dec("32"));
        assert_eq!(price(OvertimeRateType::HolidayNight), dec("36"));
    }

    #[test]
    fn test_audit_step_content() {
        let result = calculate_overtime_pay(
            dec("3"),
            OvertimeRateType::Night,
            dec("960"),
            &test_config(),
            2,
        );
        assert_eq!(result.audit_step.rule_id, "overtime_pay");
        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.input["rate_type"], "night");
        assert_eq!(result.audit_step.output["hourly_rate"], "4");
        assert_eq!(result.audit_step.output["amount"], "27");
        assert!(result.audit_step.reasoning.contains("(night)"));
    }
}
