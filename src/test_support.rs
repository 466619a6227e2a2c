//! Shared fixtures for unit tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::config::{ConfigLoader, StatutoryConfig};
use crate::models::{ContractType, Employee, NoveltyKind, PayrollNovelty};

pub(crate) fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn test_config() -> StatutoryConfig {
    ConfigLoader::load("./config/sv")
        .expect("Failed to load config")
        .config()
        .clone()
}

pub(crate) fn create_test_employee(id: &str, base_salary: &str, hire_date: NaiveDate) -> Employee {
    Employee {
        id: id.to_string(),
        name: format!("Employee {}", id),
        dui: format!("{}-dui", id),
        nit: format!("{}-nit", id),
        isss: format!("{}-isss", id),
        nup: format!("{}-nup", id),
        position: "Analyst".to_string(),
        job_description: None,
        base_salary: dec(base_salary),
        contract_type: ContractType::Monthly,
        hire_date,
        termination_date: None,
        afp_type: "Crecer".to_string(),
        status: None,
    }
}

pub(crate) fn novelty(employee_id: &str, on: NaiveDate, kind: NoveltyKind) -> PayrollNovelty {
    PayrollNovelty::new(employee_id, on, "test novelty", kind)
}
