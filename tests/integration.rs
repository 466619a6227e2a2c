//! Integration tests for the payroll engine.
//!
//! This suite drives the engine through the HTTP API and the payroll service:
//! - Statutory deductions and income-tax bracket boundaries
//! - Payroll runs with overtime, inactive employees and duplicate periods
//! - Vacation bonus payment and reset
//! - Aguinaldo window, taxability and idempotence
//! - Request errors

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::calculate_income_tax;
use payroll_engine::config::ConfigLoader;
use payroll_engine::error::EngineError;
use payroll_engine::models::{ContractType, Employee, User, UserRole};
use payroll_engine::store::{InMemoryStore, PayrollService};

// =============================================================================
// Test Helpers
// =============================================================================

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/sv").expect("Failed to load config")
}

fn create_router_for_test() -> Router {
    create_router(AppState::new(load_config()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a string-encoded decimal from a JSON value, rounded to cents.
fn cents(value: &Value) -> Decimal {
    decimal(value.as_str().unwrap()).round_dp(2)
}

async fn send(router: Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body_bytes).unwrap())
}

fn employee_json(id: &str, base_salary: &str, hire_date: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Employee {}", id),
        "dui": format!("{}-dui", id),
        "nit": format!("{}-nit", id),
        "isss": format!("{}-isss", id),
        "nup": format!("{}-nup", id),
        "position": "Analyst",
        "base_salary": base_salary,
        "contract_type": "monthly",
        "hire_date": hire_date,
        "afp_type": "Crecer"
    })
}

fn overtime_json(employee_id: &str, date: &str, hours: &str, rate: &str) -> Value {
    json!({
        "id": uuid::Uuid::new_v4(),
        "employee_id": employee_id,
        "date": date,
        "description": format!("{} hrs extra", hours),
        "type": "overtime",
        "overtime_hours": hours,
        "overtime_rate_type": rate
    })
}

fn create_employee(id: &str, base_salary: &str) -> Employee {
    serde_json::from_value(employee_json(id, base_salary, "2020-01-01")).unwrap()
}

fn admin() -> User {
    User {
        id: "u_admin".to_string(),
        username: "admin".to_string(),
        role: UserRole::Admin,
    }
}

fn create_service(employees: Vec<Employee>) -> PayrollService {
    let config = Arc::new(load_config().config().clone());
    PayrollService::in_memory(config, InMemoryStore::with_employees(employees))
}

fn date(s: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::from_str(s).unwrap()
}

// =============================================================================
// SECTION 1: Statutory Deductions
// =============================================================================

#[tokio::test]
async fn test_deductions_below_social_security_ceiling() {
    let router = create_router_for_test();
    let (status, result) = send(
        router,
        "POST",
        "/deductions/compute",
        json!({"gross_taxable_pay": "800"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cents(&result["deductions"]["social_security"]), decimal("24.00"));
    assert_eq!(cents(&result["deductions"]["pension"]), decimal("58.00"));
    assert!(result.get("employer_contributions").is_none());
}

#[tokio::test]
async fn test_deductions_social_security_capped_at_30() {
    let router = create_router_for_test();
    let (status, result) = send(
        router,
        "POST",
        "/deductions/compute",
        json!({"gross_taxable_pay": "2500", "social_security_base_pay": "2500"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cents(&result["deductions"]["social_security"]), decimal("30.00"));
    assert_eq!(cents(&result["deductions"]["pension"]), decimal("181.25"));
    assert_eq!(
        cents(&result["employer_contributions"]["social_security"]),
        decimal("75.00")
    );
    assert_eq!(
        cents(&result["employer_contributions"]["pension"]),
        decimal("218.75")
    );
}

#[test]
fn test_income_tax_bracket_boundaries() {
    let config = load_config();
    let table = config.config().income_tax();

    assert_eq!(calculate_income_tax(decimal("895.24"), table, 1).tax, decimal("60.00"));
    assert_eq!(calculate_income_tax(decimal("2038.10"), table, 1).tax, decimal("288.57"));
    assert_eq!(calculate_income_tax(decimal("471.99"), table, 1).tax, Decimal::ZERO);
    assert_eq!(calculate_income_tax(Decimal::ZERO, table, 1).tax, Decimal::ZERO);
}

// =============================================================================
// SECTION 2: Payroll Runs
// =============================================================================

#[tokio::test]
async fn test_payroll_with_day_overtime() {
    let router = create_router_for_test();
    let request = json!({
        "employees": [employee_json("emp_001", "1600", "2020-01-01")],
        "novelties": [overtime_json("emp_001", "2026-10-05", "4", "day")],
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/payrolls/compute", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["period"], "Octubre de 2026");
    let payslip = &result["payslips"][0];
    assert_eq!(cents(&payslip["overtime_pay"]), decimal("53.33"));
    assert_eq!(cents(&payslip["gross_pay"]), decimal("1653.33"));
    assert_eq!(cents(&payslip["deductions"]["social_security"]), decimal("30.00"));
    assert_eq!(cents(&payslip["deductions"]["pension"]), decimal("119.87"));
    assert_eq!(cents(&payslip["net_pay"]), decimal("1321.82"));

    let rules: Vec<&str> = payslip["audit_trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|step| step["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(rules.first(), Some(&"overtime_pay"));
    assert_eq!(rules.last(), Some(&"net_pay"));
}

#[tokio::test]
async fn test_payroll_ignores_overtime_from_other_months() {
    let router = create_router_for_test();
    let request = json!({
        "employees": [employee_json("emp_001", "1600", "2020-01-01")],
        "novelties": [overtime_json("emp_001", "2026-09-30", "4", "day")],
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/payrolls/compute", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(cents(&result["payslips"][0]["overtime_pay"]), Decimal::ZERO);
    assert_eq!(cents(&result["payslips"][0]["gross_pay"]), decimal("1600.00"));
}

#[tokio::test]
async fn test_payroll_excludes_inactive_employee() {
    let router = create_router_for_test();
    let mut inactive = employee_json("emp_002", "1600", "2020-01-01");
    inactive["status"] = json!("inactive");
    let request = json!({
        "employees": [employee_json("emp_001", "900", "2020-01-01"), inactive],
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/payrolls/compute", request).await;

    assert_eq!(status, StatusCode::OK);
    let payslips = result["payslips"].as_array().unwrap();
    assert_eq!(payslips.len(), 1);
    assert_eq!(payslips[0]["employee_id"], "emp_001");
    assert_eq!(cents(&result["total_cost"]), decimal("1046.25"));
}

#[tokio::test]
async fn test_payroll_duplicate_period_rejected() {
    let router = create_router_for_test();
    let request = json!({
        "employees": [employee_json("emp_001", "900", "2020-01-01")],
        "existing_periods": ["Septiembre de 2026", "Octubre de 2026"],
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/payrolls/compute", request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(result["code"], "DUPLICATE_PERIOD");
}

#[tokio::test]
async fn test_payroll_empty_roster_rejected() {
    let router = create_router_for_test();
    let request = json!({"employees": [], "now": "2026-10-18"});

    let (status, result) = send(router, "POST", "/payrolls/compute", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "EMPTY_ROSTER");
}

#[tokio::test]
async fn test_stored_payroll_run_is_idempotent_per_period() {
    let router = create_router_for_test();

    let (status, _) = send(
        router.clone(),
        "POST",
        "/employees",
        employee_json("emp_001", "900", "2020-01-01"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, first) = send(router.clone(), "POST", "/payrolls", json!({"now": "2026-10-18"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["period"], "Octubre de 2026");

    let (status, second) = send(router.clone(), "POST", "/payrolls", json!({"now": "2026-10-25"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(second["code"], "DUPLICATE_PERIOD");

    let (status, payrolls) = get(router.clone(), "/payrolls").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payrolls.as_array().unwrap().len(), 1);

    let (status, dashboard) = get(router, "/dashboard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(dashboard["headcount"], 1);
    assert_eq!(dashboard["latest_period"], "Octubre de 2026");
    assert_eq!(cents(&dashboard["latest_total_cost"]), decimal("1046.25"));
}

#[tokio::test]
async fn test_recorded_overtime_reaches_stored_payroll() {
    let router = create_router_for_test();
    send(
        router.clone(),
        "POST",
        "/employees",
        employee_json("emp_001", "1600", "2020-01-01"),
    )
    .await;

    let (status, novelty) = send(
        router.clone(),
        "POST",
        "/novelties",
        json!({
            "employee_id": "emp_001",
            "date": "2025-03-05",
            "type": "overtime",
            "overtime_hours": "4",
            "overtime_rate_type": "day"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(novelty["description"], "4 hrs extra (day)");

    let (status, payroll) = send(router, "POST", "/payrolls", json!({"now": "2025-03-31"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(payroll["period"], "Marzo de 2025");
    assert_eq!(cents(&payroll["payslips"][0]["overtime_pay"]), decimal("53.33"));
}

#[tokio::test]
async fn test_duplicate_employee_identifier_rejected() {
    let router = create_router_for_test();
    send(
        router.clone(),
        "POST",
        "/employees",
        employee_json("emp_001", "900", "2020-01-01"),
    )
    .await;

    let mut clash = employee_json("emp_002", "950", "2021-01-01");
    clash["dui"] = json!("emp_001-dui");
    let (status, result) = send(router, "POST", "/employees", clash).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(result["code"], "DUPLICATE_IDENTIFIER");
    assert_eq!(result["details"], "field: dui");
}

#[tokio::test]
async fn test_overtime_above_daily_cap_rejected() {
    let router = create_router_for_test();
    send(
        router.clone(),
        "POST",
        "/employees",
        employee_json("emp_001", "900", "2020-01-01"),
    )
    .await;

    let (status, result) = send(
        router,
        "POST",
        "/novelties",
        json!({
            "employee_id": "emp_001",
            "date": "2025-03-05",
            "type": "overtime",
            "overtime_hours": "9",
            "overtime_rate_type": "day"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

// =============================================================================
// SECTION 3: Vacation Bonus
// =============================================================================

#[tokio::test]
async fn test_vacation_bonus_for_900_salary() {
    let router = create_router_for_test();
    let request = json!({
        "employee": employee_json("emp_001", "900", "2020-01-01"),
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/vacations/compute", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["type"], "vacation_pay");
    assert_eq!(cents(&result["amount"]), decimal("135.00"));
    assert_eq!(result["date"], "2026-10-18");
}

#[tokio::test]
async fn test_vacation_bonus_requires_a_year_of_tenure() {
    let router = create_router_for_test();
    let request = json!({
        "employee": employee_json("emp_001", "900", "2026-01-01"),
        "now": "2026-10-18"
    });

    let (status, result) = send(router, "POST", "/vacations/compute", request).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(result["code"], "NOT_ELIGIBLE");
}

#[tokio::test]
async fn test_vacation_reset_round_trip() {
    let service = create_service(vec![create_employee("emp_001", "900")]);
    let now = date("2026-10-18");

    let paid = service.pay_vacation("emp_001", now).await.unwrap();
    assert_eq!(paid.kind.amount(), Some(decimal("135")));

    let again = service.pay_vacation("emp_001", now).await;
    assert!(matches!(again, Err(EngineError::AlreadyPaidThisYear { .. })));

    let overview = service.vacation_overview(now).await.unwrap();
    assert!(overview[0].paid_this_year);

    service.reset_vacation(&admin(), "emp_001", 2026).await.unwrap();

    let overview = service.vacation_overview(now).await.unwrap();
    assert!(overview[0].eligible);
    assert!(!overview[0].paid_this_year);
    assert!(service.pay_vacation("emp_001", now).await.is_ok());
}

// =============================================================================
// SECTION 4: Aguinaldo
// =============================================================================

#[tokio::test]
async fn test_aguinaldo_taxability_threshold() {
    let router = create_router_for_test();
    let request = json!({
        "employees": [
            employee_json("emp_001", "1500.01", "2020-01-01"),
            employee_json("emp_002", "1500.00", "2020-01-01")
        ],
        "now": "2026-11-02"
    });

    let (status, result) = send(router, "POST", "/aguinaldo/compute", request).await;

    assert_eq!(status, StatusCode::OK);
    let items = result.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["is_taxable"], true);
    assert_eq!(items[1]["is_taxable"], false);
    // Six full years of service earn 19 days
    assert_eq!(cents(&items[1]["amount"]), decimal("950.00"));
}

#[tokio::test]
async fn test_aguinaldo_window_bounds() {
    let router = create_router_for_test();
    for (now, expected) in [
        ("2026-10-19", StatusCode::UNPROCESSABLE_ENTITY),
        ("2026-10-20", StatusCode::OK),
        ("2026-12-20", StatusCode::OK),
        ("2026-12-21", StatusCode::UNPROCESSABLE_ENTITY),
    ] {
        let request = json!({
            "employees": [employee_json("emp_001", "900", "2020-01-01")],
            "now": now
        });
        let (status, _) = send(router.clone(), "POST", "/aguinaldo/compute", request).await;
        assert_eq!(status, expected, "window check on {}", now);
    }
}

#[tokio::test]
async fn test_aguinaldo_confirm_blocks_second_run() {
    let service = create_service(vec![
        create_employee("emp_001", "900"),
        create_employee("emp_002", "1600"),
    ]);
    let now = date("2026-11-02");

    let items = service.preview_aguinaldo(now).await.unwrap();
    let confirmed = service.confirm_aguinaldo(&items, now).await.unwrap();
    assert_eq!(confirmed.len(), 2);

    let rerun = service.preview_aguinaldo(now).await;
    assert!(matches!(rerun, Err(EngineError::AlreadyRunThisYear { year: 2026 })));

    // The bonus lands in the November payroll, outside the contribution base
    let payroll = service.run_payroll(now).await.unwrap();
    let payslip = payroll.payslip_for("emp_001").unwrap();
    assert_eq!(payslip.aguinaldo_pay, items[0].amount);
    assert_eq!(payslip.social_security_base, decimal("900"));
    assert!(!payslip.aguinaldo_is_taxable);
}

// =============================================================================
// SECTION 5: Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payrolls/compute")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let router = create_router_for_test();
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/deductions/compute")
                .body(Body::from(r#"{"gross_taxable_pay": "900"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
}

#[test]
fn test_employee_contract_type_accepts_spanish_alias() {
    let mut value = employee_json("emp_001", "900", "2020-01-01");
    value["contract_type"] = json!("mensual");
    let employee: Employee = serde_json::from_value(value).unwrap();
    assert_eq!(employee.contract_type, ContractType::Monthly);
}
