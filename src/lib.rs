//! Payroll engine for El Salvador.
//!
//! This crate computes monthly payrolls under Salvadoran labor law: social
//! security (ISSS) and pension (AFP) contributions, income-tax withholding,
//! overtime, the yearly vacation bonus and the year-end aguinaldo. Every
//! payslip carries an audit trace of the rules applied to it.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod intake;
pub mod models;
pub mod store;

#[cfg(test)]
mod test_support;
