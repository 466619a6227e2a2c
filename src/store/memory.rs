//! In-memory repository implementation.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::Datelike;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, NoveltyType, Payroll, PayrollNovelty, User};

use super::{
    BenefitGuard, EmployeeRepository, NoveltyRepository, PayrollRepository, UserRepository,
};

/// Holds every collection in process memory.
///
/// Payrolls are kept newest first. Each collection has its own lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<Vec<Employee>>,
    novelties: RwLock<Vec<PayrollNovelty>>,
    payrolls: RwLock<Vec<Payroll>>,
    users: RwLock<Vec<User>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a roster.
    pub fn with_employees(employees: Vec<Employee>) -> Self {
        Self {
            employees: RwLock::new(employees),
            ..Self::default()
        }
    }
}

fn benefit_name(novelty_type: NoveltyType) -> Option<&'static str> {
    match novelty_type {
        NoveltyType::VacationPay => Some("Vacation bonus"),
        NoveltyType::Aguinaldo => Some("Aguinaldo"),
        _ => None,
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        Ok(self.employees.read().await.clone())
    }

    async fn upsert_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut employees = self.employees.write().await;
        match employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => employees.push(employee),
        }
        Ok(())
    }
}

#[async_trait]
impl NoveltyRepository for InMemoryStore {
    async fn list_novelties(&self) -> EngineResult<Vec<PayrollNovelty>> {
        Ok(self.novelties.read().await.clone())
    }

    async fn insert_novelties(&self, novelties: Vec<PayrollNovelty>) -> EngineResult<()> {
        self.novelties.write().await.extend(novelties);
        Ok(())
    }

    async fn insert_benefit_novelties(
        &self,
        novelties: Vec<PayrollNovelty>,
        guard: BenefitGuard,
    ) -> EngineResult<()> {
        let mut stored = self.novelties.write().await;
        {
            let mut held: HashSet<(NoveltyType, &str, i32)> = stored
                .iter()
                .map(|n| (n.novelty_type(), n.employee_id.as_str(), n.date.year()))
                .collect();

            for novelty in &novelties {
                let novelty_type = novelty.novelty_type();
                let Some(benefit) = benefit_name(novelty_type) else {
                    continue;
                };
                let year = novelty.date.year();
                if guard == BenefitGuard::Roster
                    && stored.iter().any(|n| n.is_type_in_year(novelty_type, year))
                {
                    return Err(EngineError::AlreadyRunThisYear { year });
                }
                if !held.insert((novelty_type, novelty.employee_id.as_str(), year)) {
                    return Err(EngineError::AlreadyPaidThisYear {
                        benefit: benefit.to_string(),
                        employee_id: novelty.employee_id.clone(),
                        year,
                    });
                }
            }
        }

        stored.extend(novelties);
        Ok(())
    }

    async fn delete_novelty(&self, id: Uuid) -> EngineResult<PayrollNovelty> {
        let mut novelties = self.novelties.write().await;
        let index = novelties
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        Ok(novelties.remove(index))
    }
}

#[async_trait]
impl PayrollRepository for InMemoryStore {
    async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>> {
        Ok(self.payrolls.read().await.clone())
    }

    async fn insert_payroll(&self, payroll: Payroll) -> EngineResult<()> {
        let mut payrolls = self.payrolls.write().await;
        if payrolls.iter().any(|p| p.period == payroll.period) {
            return Err(EngineError::DuplicatePeriod {
                period: payroll.period,
            });
        }
        payrolls.insert(0, payroll);
        Ok(())
    }

    async fn delete_payroll(&self, id: Uuid) -> EngineResult<Payroll> {
        let mut payrolls = self.payrolls.write().await;
        let index = payrolls
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| EngineError::RecordNotFound { id: id.to_string() })?;
        Ok(payrolls.remove(index))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_users(&self) -> EngineResult<Vec<User>> {
        Ok(self.users.read().await.clone())
    }

    async fn upsert_user(&self, user: User) -> EngineResult<()> {
        let mut users = self.users.write().await;
        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => *existing = user,
            None => users.push(user),
        }
        Ok(())
    }
}
