//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition the engine can reject. All of them are recoverable by
//! the caller; none is fatal to the process.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::DuplicatePeriod {
///     period: "Octubre de 2026".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Payroll for period 'Octubre de 2026' has already been run"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A payroll for this period label already exists.
    #[error("Payroll for period '{period}' has already been run")]
    DuplicatePeriod {
        /// The capitalized period label, e.g. "Octubre de 2026".
        period: String,
    },

    /// There are no employees to run the payroll for.
    #[error("No employees available to run the payroll")]
    EmptyRoster,

    /// A yearly benefit was already paid to this employee this year.
    #[error("{benefit} already paid to employee '{employee_id}' in {year}")]
    AlreadyPaidThisYear {
        /// The benefit, e.g. "Vacation bonus".
        benefit: String,
        /// The employee that was already paid.
        employee_id: String,
        /// The calendar year of the existing payment.
        year: i32,
    },

    /// The employee does not meet the eligibility rules for a benefit.
    #[error("Employee '{employee_id}' is not eligible: {reason}")]
    NotEligible {
        /// The employee that was checked.
        employee_id: String,
        /// Why the employee is not eligible.
        reason: String,
    },

    /// The operation can only run inside a fixed yearly date window.
    #[error("Date {date} is outside the allowed window {start} to {end}")]
    OutsideDateWindow {
        /// The date the operation was attempted on.
        date: NaiveDate,
        /// First allowed date (inclusive).
        start: NaiveDate,
        /// Last allowed date (inclusive).
        end: NaiveDate,
    },

    /// The yearly aguinaldo process has already been run.
    #[error("The aguinaldo process has already been run for {year}")]
    AlreadyRunThisYear {
        /// The calendar year that was already processed.
        year: i32,
    },

    /// Another employee already holds this identifier.
    #[error("Duplicate employee {field}: '{value}' is already registered")]
    DuplicateIdentifier {
        /// The identifier field (name, dui, nit, isss, nup).
        field: String,
        /// The duplicated value.
        value: String,
    },

    /// Another user already holds this username.
    #[error("Username '{username}' is already in use")]
    DuplicateUsername {
        /// The duplicated username.
        username: String,
    },

    /// A novelty was invalid or contained inconsistent data.
    #[error("Invalid novelty field '{field}': {message}")]
    InvalidNovelty {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A user record was invalid.
    #[error("Invalid user field '{field}': {message}")]
    InvalidUser {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The user's role does not allow the action.
    #[error("User '{username}' is not allowed to {action}")]
    PermissionDenied {
        /// The user who attempted the action.
        username: String,
        /// The action that was refused.
        action: String,
    },

    /// No employee exists with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// No record exists with the given id.
    #[error("Record not found: {id}")]
    RecordNotFound {
        /// The id that was looked up.
        id: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
