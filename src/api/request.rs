//! Request types for the payroll engine API.
//!
//! The compute endpoints take complete snapshots: the caller supplies the
//! roster, novelties and payroll history, and receives the computed result
//! without anything being stored.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::AguinaldoLineItem;
use crate::models::{Employee, PayrollNovelty};

/// Request body for `/payrolls/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollComputeRequest {
    /// The roster, in payslip order.
    pub employees: Vec<Employee>,
    /// Every novelty on record.
    #[serde(default)]
    pub novelties: Vec<PayrollNovelty>,
    /// Labels of payrolls already run.
    #[serde(default)]
    pub existing_periods: Vec<String>,
    /// The run date; today when absent.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Request body for `/vacations/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationComputeRequest {
    /// The employee to pay.
    pub employee: Employee,
    /// Every novelty on record.
    #[serde(default)]
    pub novelties: Vec<PayrollNovelty>,
    /// The evaluation date; today when absent.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Request body for `/aguinaldo/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AguinaldoComputeRequest {
    /// The roster.
    pub employees: Vec<Employee>,
    /// Every novelty on record.
    #[serde(default)]
    pub novelties: Vec<PayrollNovelty>,
    /// The evaluation date; today when absent.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Request body for `/aguinaldo/confirm`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AguinaldoConfirmRequest {
    /// Line items from a previous `/aguinaldo/compute`.
    pub items: Vec<AguinaldoLineItem>,
    /// Every novelty on record.
    #[serde(default)]
    pub novelties: Vec<PayrollNovelty>,
    /// The confirmation date; today when absent.
    #[serde(default)]
    pub now: Option<NaiveDate>,
}

/// Request body for `/deductions/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsRequest {
    /// Taxable pay the employee deductions are computed from.
    pub gross_taxable_pay: Decimal,
    /// Base for employer contributions; skipped when absent.
    #[serde(default)]
    pub social_security_base_pay: Option<Decimal>,
}

/// Resolves an optional request date to today's local date.
pub(crate) fn resolve_now(now: Option<NaiveDate>) -> NaiveDate {
    now.unwrap_or_else(|| chrono::Local::now().date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payroll_request_defaults() {
        let json = r#"{"employees": []}"#;
        let request: PayrollComputeRequest = serde_json::from_str(json).unwrap();
        assert!(request.novelties.is_empty());
        assert!(request.existing_periods.is_empty());
        assert_eq!(request.now, None);
    }

    #[test]
    fn test_resolve_now_prefers_supplied_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(resolve_now(Some(date)), date);
    }

    #[test]
    fn test_deductions_request_accepts_string_amounts() {
        let json = r#"{"gross_taxable_pay": "900.00"}"#;
        let request: DeductionsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.gross_taxable_pay, Decimal::new(900, 0));
        assert_eq!(request.social_security_base_pay, None);
    }
}
