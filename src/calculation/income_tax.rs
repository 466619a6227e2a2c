//! Income-tax withholding.
//!
//! This module applies the monthly withholding table to taxable income that has
//! already had social security and pension deducted.

use rust_decimal::Decimal;

use crate::config::{IncomeTaxConfig, TaxBracket};
use crate::models::AuditStep;

/// The result of an income-tax calculation, including the bracket and audit step.
#[derive(Debug, Clone)]
pub struct IncomeTaxResult {
    /// The tax withheld, never negative.
    pub tax: Decimal,
    /// The bracket that applied, or `None` below the lowest bound.
    pub bracket: Option<TaxBracket>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates income-tax withholding for one month.
///
/// Only the single highest bracket whose lower bound is reached applies; the
/// brackets are not cumulative. Reaching a bound exactly selects that bracket,
/// so income equal to a bound is taxed at exactly its fixed addend.
///
/// `tax = (taxable - lower_bound) * rate + fixed_addend`, floored at zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_income_tax;
/// use payroll_engine::config::{IncomeTaxConfig, TaxBracket};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let table = IncomeTaxConfig {
///     legal_ref: "LISR".to_string(),
///     brackets: vec![
///         TaxBracket { lower_bound: dec("2038.10"), rate: dec("0.30"), fixed_addend: dec("288.57") },
///         TaxBracket { lower_bound: dec("895.24"), rate: dec("0.20"), fixed_addend: dec("60.00") },
///         TaxBracket { lower_bound: dec("472.00"), rate: dec("0.10"), fixed_addend: dec("17.67") },
///     ],
/// };
///
/// let result = calculate_income_tax(dec("895.24"), &table, 1);
/// assert_eq!(result.tax, dec("60.00"));
/// ```
pub fn calculate_income_tax(
    taxable: Decimal,
    config: &IncomeTaxConfig,
    step_number: u32,
) -> IncomeTaxResult {
    let bracket = config
        .brackets
        .iter()
        .filter(|b| taxable >= b.lower_bound)
        .max_by(|a, b| a.lower_bound.cmp(&b.lower_bound))
        .cloned();

    let (tax, reasoning) = match &bracket {
        Some(b) => {
            let raw = (taxable - b.lower_bound) * b.rate + b.fixed_addend;
            let tax = raw.max(Decimal::ZERO);
            (
                tax,
                format!(
                    "(${} - ${}) x {} + ${} = ${}",
                    taxable.normalize(),
                    b.lower_bound.normalize(),
                    b.rate.normalize(),
                    b.fixed_addend.normalize(),
                    tax.normalize()
                ),
            )
        }
        None => (
            Decimal::ZERO,
            format!("${} is below the lowest bracket - no tax", taxable.normalize()),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax_withholding".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        legal_ref: config.legal_ref.clone(),
        input: serde_json::json!({
            "taxable_after_ss_pension": taxable.normalize().to_string()
        }),
        output: serde_json::json!({
            "bracket_lower_bound": bracket.as_ref().map(|b| b.lower_bound.normalize().to_string()),
            "income_tax": tax.normalize().to_string()
        }),
        reasoning,
    };

    IncomeTaxResult {
        tax,
        bracket,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{dec, test_config};

    fn tax_for(amount: &str) -> Decimal {
        let config = test_config();
        calculate_income_tax(dec(amount), config.income_tax(), 1).tax
    }

    #[test]
    fn test_below_lowest_bound_is_zero() {
        assert_eq!(tax_for("0"), Decimal::ZERO);
        assert_eq!(tax_for("359"), Decimal::ZERO);
        assert_eq!(tax_for("471.99"), Decimal::ZERO);
    }

    #[test]
    fn test_first_bracket() {
        // (807.75 - 472.00) * 0.10 + 17.67
        assert_eq!(tax_for("807.75"), dec("51.245"));
    }

    #[test]
    fn test_boundary_895_24_is_exactly_60() {
        assert_eq!(tax_for("895.24"), dec("60.00"));
    }

    #[test]
    fn test_boundary_2038_10_is_exactly_288_57() {
        assert_eq!(tax_for("2038.10"), dec("288.57"));
    }

    #[test]
    fn test_second_bracket() {
        // (1454 - 895.24) * 0.20 + 60
        assert_eq!(tax_for("1454"), dec("171.752"));
    }

    #[test]
    fn test_top_bracket_not_cumulative() {
        // (2752.5 - 2038.10) * 0.30 + 288.57
        assert_eq!(tax_for("2752.5"), dec("502.89"));
    }

    #[test]
    fn test_bracket_reported() {
        let config = test_config();
        let result = calculate_income_tax(dec("1000"), config.income_tax(), 1);
        assert_eq!(result.bracket.unwrap().lower_bound, dec("895.24"));

        let result = calculate_income_tax(dec("100"), config.income_tax(), 1);
        assert!(result.bracket.is_none());
    }

    #[test]
    fn test_audit_step_content() {
        let config = test_config();
        let result = calculate_income_tax(dec("1454"), config.income_tax(), 4);

        assert_eq!(result.audit_step.step_number, 4);
        assert_eq!(result.audit_step.rule_id, "income_tax_withholding");
        assert_eq!(result.audit_step.output["income_tax"], "171.752");
        assert_eq!(result.audit_step.output["bracket_lower_bound"], "895.24");
        assert!(result.audit_step.reasoning.contains("$1454"));
    }

    #[test]
    fn test_negative_result_is_floored() {
        let table = IncomeTaxConfig {
            legal_ref: "test".to_string(),
            brackets: vec![TaxBracket {
                lower_bound: dec("100"),
                rate: dec("0.10"),
                fixed_addend: dec("-50"),
            }],
        };
        let result = calculate_income_tax(dec("150"), &table, 1);
        assert_eq!(result.tax, Decimal::ZERO);
    }
}
