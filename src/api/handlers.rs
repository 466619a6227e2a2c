//! HTTP request handlers for the payroll engine API.
//!
//! The `/…/compute` endpoints are pure: they calculate on the snapshot in the
//! request and store nothing. The remaining endpoints go through the payroll
//! service and its store.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_deductions, calculate_employer_contributions, compute_aguinaldo_batch,
    compute_payroll, compute_vacation_bonus, confirm_aguinaldo_batch,
};
use crate::error::EngineError;
use crate::intake::NoveltyRequest;
use crate::models::Employee;

use super::request::{
    AguinaldoComputeRequest, AguinaldoConfirmRequest, DeductionsRequest, PayrollComputeRequest,
    VacationComputeRequest, resolve_now,
};
use super::response::{ApiError, ApiErrorResponse, DeductionsResponse};
use super::state::AppState;

/// Request body for `POST /payrolls`.
#[derive(Debug, Default, Deserialize)]
struct RunPayrollRequest {
    #[serde(default)]
    now: Option<chrono::NaiveDate>,
}

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payrolls/compute", post(compute_payroll_handler))
        .route("/vacations/compute", post(compute_vacation_handler))
        .route("/aguinaldo/compute", post(compute_aguinaldo_handler))
        .route("/aguinaldo/confirm", post(confirm_aguinaldo_handler))
        .route("/deductions/compute", post(compute_deductions_handler))
        .route("/employees", get(list_employees_handler).post(register_employee_handler))
        .route("/novelties", post(record_novelty_handler))
        .route("/novelties/:id", delete(delete_novelty_handler))
        .route("/payrolls", get(list_payrolls_handler).post(run_payroll_handler))
        .route("/payrolls/:id", delete(delete_payroll_handler))
        .route("/dashboard", get(dashboard_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(error: EngineError, correlation_id: Uuid) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %error,
        "Request rejected"
    );
    ApiErrorResponse::from(error).into_response()
}

fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") || body_text.contains("unknown variant") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

fn parse_id(raw: &str, correlation_id: Uuid) -> Result<Uuid, Response> {
    Uuid::parse_str(raw).map_err(|_| {
        warn!(correlation_id = %correlation_id, id = raw, "Invalid record id");
        json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(format!("Invalid id: {}", raw)),
        )
    })
}

/// Handler for POST /payrolls/compute.
async fn compute_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollComputeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll computation");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let start_time = Instant::now();
    match compute_payroll(
        &request.employees,
        &request.novelties,
        &request.existing_periods,
        resolve_now(request.now),
        state.config().config(),
    ) {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                period = %payroll.period,
                payslips = payroll.payslips.len(),
                total_cost = %payroll.total_cost.round_dp(2),
                total_net_pay = %payroll.total_net_pay().round_dp(2),
                duration_us = start_time.elapsed().as_micros(),
                "Payroll computation completed"
            );
            json_response(StatusCode::OK, payroll)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /vacations/compute.
async fn compute_vacation_handler(
    State(state): State<AppState>,
    payload: Result<Json<VacationComputeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_vacation_bonus(
        &request.employee,
        &request.novelties,
        resolve_now(request.now),
        state.config().config(),
    ) {
        Ok(novelty) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %novelty.employee_id,
                "Vacation bonus computed"
            );
            json_response(StatusCode::OK, novelty)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /aguinaldo/compute.
async fn compute_aguinaldo_handler(
    State(state): State<AppState>,
    payload: Result<Json<AguinaldoComputeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_aguinaldo_batch(
        &request.employees,
        &request.novelties,
        resolve_now(request.now),
        state.config().config(),
    ) {
        Ok(items) => {
            info!(
                correlation_id = %correlation_id,
                items = items.len(),
                "Aguinaldo batch computed"
            );
            json_response(StatusCode::OK, items)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /aguinaldo/confirm.
async fn confirm_aguinaldo_handler(
    State(state): State<AppState>,
    payload: Result<Json<AguinaldoConfirmRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match confirm_aguinaldo_batch(
        &request.items,
        &request.novelties,
        resolve_now(request.now),
        state.config().config(),
    ) {
        Ok(novelties) => {
            info!(
                correlation_id = %correlation_id,
                novelties = novelties.len(),
                "Aguinaldo batch confirmed"
            );
            json_response(StatusCode::OK, novelties)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /deductions/compute.
async fn compute_deductions_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeductionsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let config = state.config().config();
    let deduction_result = calculate_deductions(request.gross_taxable_pay, config, 1);
    let mut audit_trace = deduction_result.audit_steps;

    let employer_contributions = request.social_security_base_pay.map(|base| {
        let step_number = audit_trace.len() as u32 + 1;
        let result = calculate_employer_contributions(base, config.contributions(), step_number);
        audit_trace.push(result.audit_step);
        result.contributions
    });

    json_response(
        StatusCode::OK,
        DeductionsResponse {
            deductions: deduction_result.deductions,
            employer_contributions,
            audit_trace,
        },
    )
}

/// Handler for GET /employees.
async fn list_employees_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().list_employees().await {
        Ok(employees) => json_response(StatusCode::OK, employees),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /employees.
async fn register_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let employee = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.service().register_employee(employee).await {
        Ok(employee) => json_response(StatusCode::CREATED, employee),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /novelties.
async fn record_novelty_handler(
    State(state): State<AppState>,
    payload: Result<Json<NoveltyRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.service().record_novelty(request, resolve_now(None)).await {
        Ok(novelty) => json_response(StatusCode::CREATED, novelty),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for DELETE /novelties/:id.
async fn delete_novelty_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match parse_id(&id, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.service().delete_novelty(id).await {
        Ok(novelty) => json_response(StatusCode::OK, novelty),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /payrolls.
async fn list_payrolls_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().list_payrolls().await {
        Ok(payrolls) => json_response(StatusCode::OK, payrolls),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for POST /payrolls.
///
/// Runs and stores the payroll for the current month.
async fn run_payroll_handler(
    State(state): State<AppState>,
    payload: Result<Json<RunPayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll run");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match state.service().run_payroll(resolve_now(request.now)).await {
        Ok(payroll) => {
            info!(
                correlation_id = %correlation_id,
                payroll_id = %payroll.id,
                period = %payroll.period,
                "Payroll run completed"
            );
            json_response(StatusCode::CREATED, payroll)
        }
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for DELETE /payrolls/:id.
async fn delete_payroll_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let correlation_id = Uuid::new_v4();
    let id = match parse_id(&id, correlation_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.service().delete_payroll(id).await {
        Ok(payroll) => json_response(StatusCode::OK, payroll),
        Err(err) => error_response(err, correlation_id),
    }
}

/// Handler for GET /dashboard.
async fn dashboard_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    match state.service().dashboard().await {
        Ok(summary) => json_response(StatusCode::OK, summary),
        Err(err) => error_response(err, correlation_id),
    }
}
