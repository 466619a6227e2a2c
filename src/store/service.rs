//! The payroll service.
//!
//! Every operation follows the same shape: read a snapshot from the
//! repositories, run the pure calculation, commit the outcome in one write.
//! A rejected operation writes nothing.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    AguinaldoLineItem, VacationStatus, compute_aguinaldo_batch, compute_payroll,
    compute_vacation_bonus, confirm_aguinaldo_batch, vacation_status,
};
use crate::config::{AguinaldoIdempotence, StatutoryConfig};
use crate::error::{EngineError, EngineResult};
use crate::intake::{NoveltyRequest, prepare_novelty, validate_employee, validate_user};
use crate::models::{Employee, NoveltyType, Payroll, PayrollNovelty, User};

use super::{
    BenefitGuard, EmployeeRepository, InMemoryStore, NoveltyRepository, PayrollRepository,
    UserRepository,
};

/// Headline figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Number of employees on the roster.
    pub headcount: usize,
    /// Period label of the most recent payroll, if any.
    pub latest_period: Option<String>,
    /// Total cost of the most recent payroll, zero if none.
    pub latest_total_cost: Decimal,
    /// Mean base salary across the roster, zero if empty.
    pub average_base_salary: Decimal,
}

/// Coordinates the repositories and the calculation core.
#[derive(Clone)]
pub struct PayrollService {
    config: Arc<StatutoryConfig>,
    employees: Arc<dyn EmployeeRepository>,
    novelties: Arc<dyn NoveltyRepository>,
    payrolls: Arc<dyn PayrollRepository>,
    users: Arc<dyn UserRepository>,
}

impl PayrollService {
    /// Creates a service over the given repositories.
    pub fn new(
        config: Arc<StatutoryConfig>,
        employees: Arc<dyn EmployeeRepository>,
        novelties: Arc<dyn NoveltyRepository>,
        payrolls: Arc<dyn PayrollRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            config,
            employees,
            novelties,
            payrolls,
            users,
        }
    }

    /// Creates a service backed by a single in-memory store.
    pub fn in_memory(config: Arc<StatutoryConfig>, store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self::new(config, store.clone(), store.clone(), store.clone(), store)
    }

    /// Returns the statutory configuration.
    pub fn config(&self) -> &StatutoryConfig {
        &self.config
    }

    /// Runs the payroll for the month containing `now` and stores it.
    ///
    /// The repository refuses a second payroll for the same period even when
    /// two runs race past the snapshot check.
    pub async fn run_payroll(&self, now: NaiveDate) -> EngineResult<Payroll> {
        let employees = self.employees.list_employees().await?;
        let novelties = self.novelties.list_novelties().await?;
        let existing_periods: Vec<String> = self
            .payrolls
            .list_payrolls()
            .await?
            .into_iter()
            .map(|p| p.period)
            .collect();

        let payroll = compute_payroll(&employees, &novelties, &existing_periods, now, &self.config)?;
        self.payrolls.insert_payroll(payroll.clone()).await?;

        info!(
            payroll_id = %payroll.id,
            period = %payroll.period,
            total_net_pay = %payroll.total_net_pay().round_dp(2),
            "Payroll stored"
        );
        Ok(payroll)
    }

    /// All payrolls, most recent first.
    pub async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>> {
        self.payrolls.list_payrolls().await
    }

    /// Deletes a payroll together with its payslips.
    pub async fn delete_payroll(&self, id: Uuid) -> EngineResult<Payroll> {
        let deleted = self.payrolls.delete_payroll(id).await?;
        info!(payroll_id = %id, period = %deleted.period, "Payroll deleted");
        Ok(deleted)
    }

    /// Validates and stores a manual novelty.
    pub async fn record_novelty(
        &self,
        request: NoveltyRequest,
        today: NaiveDate,
    ) -> EngineResult<PayrollNovelty> {
        let employees = self.employees.list_employees().await?;
        let novelty = prepare_novelty(request, &employees, today, &self.config)?;
        self.novelties.insert_novelties(vec![novelty.clone()]).await?;
        info!(
            novelty_id = %novelty.id,
            employee_id = %novelty.employee_id,
            "Novelty recorded"
        );
        Ok(novelty)
    }

    /// Deletes a novelty.
    pub async fn delete_novelty(&self, id: Uuid) -> EngineResult<PayrollNovelty> {
        self.novelties.delete_novelty(id).await
    }

    /// The vacation bonus position of every employee on `now`.
    pub async fn vacation_overview(&self, now: NaiveDate) -> EngineResult<Vec<VacationStatus>> {
        let employees = self.employees.list_employees().await?;
        let novelties = self.novelties.list_novelties().await?;
        Ok(employees
            .iter()
            .map(|e| vacation_status(e, &novelties, now, &self.config))
            .collect())
    }

    /// Pays an employee's vacation bonus for the year of `now`.
    ///
    /// The repository re-checks the year under its write lock, so a racing
    /// second payment fails with `AlreadyPaidThisYear`.
    pub async fn pay_vacation(
        &self,
        employee_id: &str,
        now: NaiveDate,
    ) -> EngineResult<PayrollNovelty> {
        let employee = self.find_employee(employee_id).await?;
        let novelties = self.novelties.list_novelties().await?;
        let novelty = compute_vacation_bonus(&employee, &novelties, now, &self.config)?;
        self.novelties
            .insert_benefit_novelties(vec![novelty.clone()], BenefitGuard::PerEmployee)
            .await?;
        Ok(novelty)
    }

    /// Deletes an employee's vacation bonus for `year`, making them payable again.
    ///
    /// Only admins may reset a payment.
    pub async fn reset_vacation(
        &self,
        actor: &User,
        employee_id: &str,
        year: i32,
    ) -> EngineResult<PayrollNovelty> {
        if !actor.can_reset_benefits() {
            warn!(username = %actor.username, employee_id, "Vacation reset refused");
            return Err(EngineError::PermissionDenied {
                username: actor.username.clone(),
                action: "reset vacation payments".to_string(),
            });
        }

        let novelties = self.novelties.list_novelties().await?;
        let paid = novelties
            .iter()
            .find(|n| n.employee_id == employee_id && n.is_type_in_year(NoveltyType::VacationPay, year))
            .ok_or_else(|| EngineError::RecordNotFound {
                id: format!("vacation_pay/{}/{}", employee_id, year),
            })?;

        let deleted = self.novelties.delete_novelty(paid.id).await?;
        info!(employee_id, year, "Vacation payment reset");
        Ok(deleted)
    }

    /// Previews the year-end bonus batch without storing anything.
    pub async fn preview_aguinaldo(&self, now: NaiveDate) -> EngineResult<Vec<AguinaldoLineItem>> {
        let employees = self.employees.list_employees().await?;
        let novelties = self.novelties.list_novelties().await?;
        compute_aguinaldo_batch(&employees, &novelties, now, &self.config)
    }

    /// Stores the previewed year-end bonus batch as novelties.
    pub async fn confirm_aguinaldo(
        &self,
        items: &[AguinaldoLineItem],
        now: NaiveDate,
    ) -> EngineResult<Vec<PayrollNovelty>> {
        let novelties = self.novelties.list_novelties().await?;
        let confirmed = confirm_aguinaldo_batch(items, &novelties, now, &self.config)?;
        let guard = match self.config.benefits().aguinaldo.idempotence {
            AguinaldoIdempotence::Roster => BenefitGuard::Roster,
            AguinaldoIdempotence::Employee => BenefitGuard::PerEmployee,
        };
        self.novelties.insert_benefit_novelties(confirmed.clone(), guard).await?;
        Ok(confirmed)
    }

    /// All employees in roster order.
    pub async fn list_employees(&self) -> EngineResult<Vec<Employee>> {
        self.employees.list_employees().await
    }

    /// Adds a new employee to the roster.
    pub async fn register_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let existing = self.employees.list_employees().await?;
        if existing.iter().any(|e| e.id == employee.id) {
            return Err(EngineError::DuplicateIdentifier {
                field: "id".to_string(),
                value: employee.id,
            });
        }
        validate_employee(&employee, &existing)?;
        self.employees.upsert_employee(employee.clone()).await?;
        info!(employee_id = %employee.id, "Employee registered");
        Ok(employee)
    }

    /// Replaces an existing employee record.
    pub async fn update_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let existing = self.employees.list_employees().await?;
        if !existing.iter().any(|e| e.id == employee.id) {
            return Err(EngineError::EmployeeNotFound { id: employee.id });
        }
        validate_employee(&employee, &existing)?;
        self.employees.upsert_employee(employee.clone()).await?;
        Ok(employee)
    }

    /// Adds or updates an application user.
    pub async fn register_user(&self, user: User) -> EngineResult<User> {
        let existing = self.users.list_users().await?;
        validate_user(&user, &existing)?;
        let user = User {
            username: user.username.trim().to_string(),
            ..user
        };
        self.users.upsert_user(user.clone()).await?;
        Ok(user)
    }

    /// Headcount, latest payroll cost and average salary.
    pub async fn dashboard(&self) -> EngineResult<DashboardSummary> {
        let employees = self.employees.list_employees().await?;
        let payrolls = self.payrolls.list_payrolls().await?;
        let latest = payrolls.first();

        let average_base_salary = if employees.is_empty() {
            Decimal::ZERO
        } else {
            employees.iter().map(|e| e.base_salary).sum::<Decimal>()
                / Decimal::from(employees.len())
        };

        Ok(DashboardSummary {
            headcount: employees.len(),
            latest_period: latest.map(|p| p.period.clone()),
            latest_total_cost: latest.map_or(Decimal::ZERO, |p| p.total_cost),
            average_base_salary,
        })
    }

    async fn find_employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.employees
            .list_employees()
            .await?
            .into_iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            })
    }
}
