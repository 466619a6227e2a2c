//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod novelty;
mod payroll;
mod period;
mod user;

pub use employee::{ContractType, Employee, EmployeeStatus};
pub use novelty::{NoveltyKind, NoveltyType, OvertimeRateType, PayrollNovelty};
pub use payroll::{
    AuditStep, EmployeeDeductions, EmployerContributions, NoveltyTotals, Payroll, Payslip,
};
pub use period::{PayPeriod, PeriodLocale};
pub use user::{User, UserRole};
