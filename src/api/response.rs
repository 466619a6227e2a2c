//! Response types for the payroll engine API.
//!
//! This module defines the error response structures, the mapping from
//! engine errors to HTTP status codes, and the response bodies that are not
//! plain domain models.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{AuditStep, EmployeeDeductions, EmployerContributions};

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    fn new(status: StatusCode, code: &str, error: &EngineError) -> Self {
        Self {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, code) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            EngineError::DuplicatePeriod { .. } => (StatusCode::CONFLICT, "DUPLICATE_PERIOD"),
            EngineError::AlreadyPaidThisYear { .. } => {
                (StatusCode::CONFLICT, "ALREADY_PAID_THIS_YEAR")
            }
            EngineError::AlreadyRunThisYear { .. } => {
                (StatusCode::CONFLICT, "ALREADY_RUN_THIS_YEAR")
            }
            EngineError::DuplicateIdentifier { field, .. } => {
                return Self {
                    status: StatusCode::CONFLICT,
                    error: ApiError::with_details(
                        "DUPLICATE_IDENTIFIER",
                        error.to_string(),
                        format!("field: {}", field),
                    ),
                };
            }
            EngineError::DuplicateUsername { .. } => (StatusCode::CONFLICT, "DUPLICATE_USERNAME"),
            EngineError::EmptyRoster => (StatusCode::UNPROCESSABLE_ENTITY, "EMPTY_ROSTER"),
            EngineError::NotEligible { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "NOT_ELIGIBLE"),
            EngineError::OutsideDateWindow { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "OUTSIDE_DATE_WINDOW")
            }
            EngineError::InvalidNovelty { field, .. }
            | EngineError::InvalidEmployee { field, .. }
            | EngineError::InvalidUser { field, .. } => {
                return Self {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::with_details(
                        "VALIDATION_ERROR",
                        error.to_string(),
                        format!("field: {}", field),
                    ),
                };
            }
            EngineError::PermissionDenied { .. } => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            EngineError::EmployeeNotFound { .. } => (StatusCode::NOT_FOUND, "EMPLOYEE_NOT_FOUND"),
            EngineError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
            EngineError::CalculationError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR")
            }
        };
        Self::new(status, code, &error)
    }
}

/// Response body for `/deductions/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeductionsResponse {
    /// Statutory employee deductions on the gross taxable pay.
    pub deductions: EmployeeDeductions,
    /// Employer contributions, when a social-security base was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_contributions: Option<EmployerContributions>,
    /// The calculation steps.
    pub audit_trace: Vec<AuditStep>,
}
