//! Employee registration rules.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// The identifiers that must be unique across the roster.
fn identifiers(employee: &Employee) -> [(&'static str, String); 5] {
    [
        ("name", employee.name.trim().to_lowercase()),
        ("dui", employee.dui.trim().to_string()),
        ("nit", employee.nit.trim().to_string()),
        ("isss", employee.isss.trim().to_string()),
        ("nup", employee.nup.trim().to_string()),
    ]
}

/// Validates an employee about to be created or updated.
///
/// `existing` is the current roster; an entry with the candidate's id is the
/// record being updated and is not compared against.
///
/// # Errors
///
/// - `InvalidEmployee` for a blank name, a non-positive base salary, or a
///   termination date before the hire date
/// - `DuplicateIdentifier` if another employee shares the name (ignoring
///   case), DUI, NIT, ISSS number or NUP
pub fn validate_employee(candidate: &Employee, existing: &[Employee]) -> EngineResult<()> {
    if candidate.name.trim().is_empty() {
        return Err(invalid("name", "name is required"));
    }
    if candidate.base_salary <= Decimal::ZERO {
        return Err(invalid("base_salary", "base salary must be greater than zero"));
    }
    if let Some(termination) = candidate.termination_date {
        if termination < candidate.hire_date {
            return Err(invalid(
                "termination_date",
                "termination date cannot precede the hire date",
            ));
        }
    }

    let wanted = identifiers(candidate);
    for other in existing.iter().filter(|e| e.id != candidate.id) {
        for ((field, value), (_, taken)) in wanted.iter().zip(identifiers(other)) {
            if !value.is_empty() && *value == taken {
                return Err(EngineError::DuplicateIdentifier {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }
    }

    Ok(())
}
