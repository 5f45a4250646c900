//! Per-employee payroll ledger.
//!
//! Salary-affecting entries form a strict chain ordered by business date:
//! each entry's `salary_before` is the previous entry's `salary_after`.
//! Editing or deleting a past entry relinks everything after it.

pub mod chain;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_tests;

pub use chain::recompute_chain;
pub use service::{PayrollPlan, PayrollService};
pub use types::{
    CreateSalaryTransactionInput, Employee, SalaryTransaction, SalaryTransactionKind,
    SalaryTransactionUpdate,
};
