//! Payroll entry planning.

use chrono::{DateTime, Utc};
use mizan_shared::types::{CategoryId, SalaryTransactionId, TransactionId, UserId};
use rust_decimal::Decimal;

use super::types::{
    CreateSalaryTransactionInput, Employee, SalaryTransaction, SalaryTransactionKind,
    SalaryTransactionUpdate,
};
use crate::error::DomainError;
use crate::ledger::{Transaction, TransactionKind};
use crate::mutation::{DeltaSet, DeltaTarget};
use crate::treasury::Treasury;

/// A validated payroll entry ready to commit.
///
/// The caller appends the entry and then relinks the whole chain with
/// [`super::chain::recompute_chain`], which settles the final
/// `salary_before`/`salary_after` values even for backdated entries.
#[derive(Debug, Clone)]
pub struct PayrollPlan {
    /// The salary entry to insert.
    pub entry: SalaryTransaction,
    /// Withdrawal twin when a salary entry is disbursed out of a treasury.
    pub twin: Option<Transaction>,
    /// Treasury debit for the disbursement. Empty otherwise.
    pub deltas: DeltaSet,
}

/// Planning functions for payroll entries.
pub struct PayrollService;

impl PayrollService {
    /// Validates a payroll entry and plans its optional disbursement.
    ///
    /// Only `Salary` entries with a treasury move money: the absolute amount
    /// leaves the treasury and a Withdrawal twin is written under the given
    /// salaries category.
    ///
    /// # Errors
    ///
    /// - `Validation` for a zero amount
    /// - `InsufficientBalance` when the treasury cannot cover the
    ///   disbursement
    pub fn plan_create(
        input: &CreateSalaryTransactionInput,
        employee: &Employee,
        treasury: Option<&Treasury>,
        salary_category: Option<CategoryId>,
        recorded_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<PayrollPlan, DomainError> {
        if input.amount == Decimal::ZERO {
            return Err(DomainError::Validation(
                "salary entry amount must not be zero".into(),
            ));
        }

        let date = input.date.unwrap_or(now);
        // Provisional link values; the chain relink settles them.
        let entry = SalaryTransaction {
            id: SalaryTransactionId::new(),
            employee: employee.id,
            kind: input.kind,
            amount: input.amount,
            description: input.description.clone(),
            salary_before: employee.salary,
            salary_after: employee.salary + input.amount,
            date,
            created_at: now,
        };

        let mut deltas = DeltaSet::new();
        let mut twin = None;
        if input.kind == SalaryTransactionKind::Salary {
            if let Some(treasury) = treasury {
                let disbursed = input.amount.abs();
                treasury.ensure_can_debit(disbursed)?;
                deltas.debit(DeltaTarget::TreasuryBalance(treasury.id), disbursed);
                twin = Some(Transaction {
                    id: TransactionId::new(),
                    treasury: treasury.id,
                    target_treasury: None,
                    project: None,
                    kind: TransactionKind::Withdrawal,
                    amount: disbursed,
                    description: Some(format!("salary disbursement for {}", employee.name)),
                    category: salary_category,
                    vendor: None,
                    payment_method: None,
                    contract_payment: None,
                    sale: None,
                    recorded_by,
                    date,
                    created_at: now,
                });
            }
        }

        Ok(PayrollPlan {
            entry,
            twin,
            deltas,
        })
    }

    /// Applies an update to a salary entry's own fields.
    ///
    /// The caller must relink the employee's chain afterwards; a changed
    /// amount or date invalidates every later entry's link values.
    pub fn apply_update(entry: &mut SalaryTransaction, update: SalaryTransactionUpdate) {
        if let Some(amount) = update.amount {
            entry.amount = amount;
        }
        if let Some(kind) = update.kind {
            entry.kind = kind;
        }
        if let Some(date) = update.date {
            entry.date = date;
        }
        if let Some(description) = update.description {
            entry.description = Some(description);
        }
    }
}
