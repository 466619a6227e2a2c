//! HTTP API module for the payroll engine.
//!
//! Exposes the pure compute endpoints and the store-backed payroll
//! operations as a JSON REST API.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AguinaldoComputeRequest, AguinaldoConfirmRequest, DeductionsRequest, PayrollComputeRequest,
    VacationComputeRequest,
};
pub use response::{ApiError, DeductionsResponse};
pub use state::AppState;
