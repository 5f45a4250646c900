//! Payroll domain types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{EmployeeId, SalaryTransactionId, TreasuryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of salary-affecting entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryTransactionKind {
    /// The periodic salary itself; may be disbursed out of a treasury.
    Salary,
    /// One-off addition.
    Bonus,
    /// One-off subtraction.
    Deduction,
    /// Recurring addition.
    Allowance,
    /// Performance-based addition.
    Commission,
}

/// An employee on the payroll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier.
    pub id: EmployeeId,
    /// Unique display name.
    pub name: String,
    /// Job title.
    pub position: Option<String>,
    /// Salary the chain starts from when no entries exist.
    pub base_salary: Decimal,
    /// Derived: `salary_after` of the chain's last entry, or `base_salary`.
    pub salary: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Employee {
    /// Creates an employee whose current salary starts at the base.
    #[must_use]
    pub fn new(
        name: String,
        position: Option<String>,
        base_salary: Decimal,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EmployeeId::new(),
            name,
            position,
            base_salary,
            salary: base_salary,
            created_at: now,
        }
    }
}

/// One link in an employee's salary chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryTransaction {
    /// Unique identifier.
    pub id: SalaryTransactionId,
    /// Employee the entry belongs to.
    pub employee: EmployeeId,
    /// Kind of entry.
    pub kind: SalaryTransactionKind,
    /// Signed amount: positive raises the running salary, negative lowers it.
    pub amount: Decimal,
    /// Free-form note.
    pub description: Option<String>,
    /// Derived: running salary before this entry.
    pub salary_before: Decimal,
    /// Derived: `salary_before + amount`.
    pub salary_after: Decimal,
    /// Business date; primary ordering key of the chain.
    pub date: DateTime<Utc>,
    /// Creation timestamp; tiebreaker for same-date ordering.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a salary entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSalaryTransactionInput {
    /// Employee the entry belongs to.
    pub employee: EmployeeId,
    /// Kind of entry.
    pub kind: SalaryTransactionKind,
    /// Signed amount. Must not be zero.
    pub amount: Decimal,
    /// Free-form note.
    pub description: Option<String>,
    /// Treasury to disburse a salary entry out of.
    pub treasury: Option<TreasuryId>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Fields a salary entry update may change. The chain is recomputed after.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SalaryTransactionUpdate {
    /// New signed amount.
    pub amount: Option<Decimal>,
    /// New kind.
    pub kind: Option<SalaryTransactionKind>,
    /// New business date; may reposition the entry within the chain.
    pub date: Option<DateTime<Utc>>,
    /// New note.
    pub description: Option<String>,
}
