//! Persistence ports and the payroll service built on them.
//!
//! The calculation core never holds state. The service reads a snapshot from
//! the repositories at the start of every operation, runs the pure
//! calculation, and commits the result in a single write.

mod memory;
mod service;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Employee, Payroll, PayrollNovelty, User};

pub use memory::InMemoryStore;
pub use service::{DashboardSummary, PayrollService};

/// How a yearly benefit insert detects an earlier payment in the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenefitGuard {
    /// Refuse an employee who already holds the benefit that year.
    PerEmployee,
    /// Refuse the batch if anyone on the roster holds the benefit that year.
    Roster,
}

/// Employee persistence.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees in roster order.
    async fn list_employees(&self) -> EngineResult<Vec<Employee>>;

    /// Insert a new employee or replace the one with the same id.
    async fn upsert_employee(&self, employee: Employee) -> EngineResult<()>;
}

/// Novelty persistence.
#[async_trait]
pub trait NoveltyRepository: Send + Sync {
    /// All novelties.
    async fn list_novelties(&self) -> EngineResult<Vec<PayrollNovelty>>;

    /// Store novelties as one write.
    async fn insert_novelties(&self, novelties: Vec<PayrollNovelty>) -> EngineResult<()>;

    /// Store vacation or aguinaldo novelties, at most one per employee and year.
    ///
    /// The check and the insert happen as one step. A novelty whose employee
    /// already holds the same benefit that year, or that repeats an employee in
    /// the batch, fails with `AlreadyPaidThisYear`. Under [`BenefitGuard::Roster`]
    /// any holder in that year fails with `AlreadyRunThisYear`. On failure
    /// nothing is stored.
    async fn insert_benefit_novelties(
        &self,
        novelties: Vec<PayrollNovelty>,
        guard: BenefitGuard,
    ) -> EngineResult<()>;

    /// Delete a novelty, returning it. Fails with `RecordNotFound`.
    async fn delete_novelty(&self, id: Uuid) -> EngineResult<PayrollNovelty>;
}

/// Payroll persistence.
#[async_trait]
pub trait PayrollRepository: Send + Sync {
    /// All payrolls, most recent run first.
    async fn list_payrolls(&self) -> EngineResult<Vec<Payroll>>;

    /// Store a payroll unless one with the same period label exists.
    ///
    /// The check and the insert happen as one step; a conflicting payroll
    /// fails with `DuplicatePeriod` and nothing is stored.
    async fn insert_payroll(&self, payroll: Payroll) -> EngineResult<()>;

    /// Delete a payroll and its payslips, returning it. Fails with `RecordNotFound`.
    async fn delete_payroll(&self, id: Uuid) -> EngineResult<Payroll>;
}

/// User persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users.
    async fn list_users(&self) -> EngineResult<Vec<User>>;

    /// Insert a new user or replace the one with the same id.
    async fn upsert_user(&self, user: User) -> EngineResult<()>;
}
