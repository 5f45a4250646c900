//! Transaction planning: validation and balance delta derivation.
//!
//! Planning happens against treasury snapshots and produces the record plus
//! its [`DeltaSet`] without touching anything, so a failed validation never
//! leaves partial state behind.

use chrono::{DateTime, Utc};
use mizan_shared::types::{TransactionId, UserId};
use rust_decimal::Decimal;

use super::types::{CreateTransactionInput, Transaction, TransactionKind, TransactionUpdate};
use crate::error::DomainError;
use crate::mutation::{DeltaSet, DeltaTarget};
use crate::treasury::Treasury;

/// A validated transaction ready to commit.
#[derive(Debug, Clone)]
pub struct TransactionPlan {
    /// The transaction record to insert.
    pub transaction: Transaction,
    /// The balance deltas to apply alongside it.
    pub deltas: DeltaSet,
}

/// Planning functions for ledger transactions.
pub struct LedgerService;

impl LedgerService {
    /// Validates a transaction and derives its balance deltas.
    ///
    /// `source` is the treasury named by the input; `target` must be given
    /// when (and only when) the input is a transfer.
    ///
    /// # Errors
    ///
    /// - `Validation` for non-positive amounts, a missing transfer target,
    ///   or an attempt to record a contractor payment directly
    /// - `InvalidReference` for a transfer onto itself
    /// - `InsufficientBalance` when a withdrawal or transfer overdraws
    ///   the source treasury
    pub fn plan_create(
        input: &CreateTransactionInput,
        source: &Treasury,
        target: Option<&Treasury>,
        recorded_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<TransactionPlan, DomainError> {
        // 1. Amount must be strictly positive; the kind carries direction.
        if input.amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "transaction amount must be positive".into(),
            ));
        }

        // 2. Derive the deltas per kind.
        let mut deltas = DeltaSet::new();
        match input.kind {
            TransactionKind::Deposit => {
                deltas.credit(DeltaTarget::TreasuryBalance(source.id), input.amount);
                if let Some(project) = input.project {
                    deltas.credit(DeltaTarget::ProjectRevenue(project), input.amount);
                }
            }
            TransactionKind::Withdrawal => {
                source.ensure_can_debit(input.amount)?;
                deltas.debit(DeltaTarget::TreasuryBalance(source.id), input.amount);
                if let Some(project) = input.project {
                    deltas.credit(DeltaTarget::ProjectExpenses(project), input.amount);
                }
            }
            TransactionKind::Transfer => {
                let target = target.ok_or_else(|| {
                    DomainError::Validation("transfer requires a target treasury".into())
                })?;
                if target.id == source.id {
                    return Err(DomainError::InvalidReference(
                        "cannot transfer a treasury to itself".into(),
                    ));
                }
                source.ensure_can_debit(input.amount)?;
                deltas.debit(DeltaTarget::TreasuryBalance(source.id), input.amount);
                deltas.credit(DeltaTarget::TreasuryBalance(target.id), input.amount);
            }
            TransactionKind::ContractorPayment => {
                return Err(DomainError::Validation(
                    "contractor payments are recorded through contract settlement".into(),
                ));
            }
        }

        // 3. Build the record.
        let transaction = Transaction {
            id: TransactionId::new(),
            treasury: source.id,
            target_treasury: if input.kind == TransactionKind::Transfer {
                input.target_treasury
            } else {
                None
            },
            project: input.project,
            kind: input.kind,
            amount: input.amount,
            description: input.description.clone(),
            category: input.category,
            vendor: input.vendor.clone(),
            payment_method: input.payment_method.clone(),
            contract_payment: None,
            sale: None,
            recorded_by,
            date: input.date.unwrap_or(now),
            created_at: now,
        };

        Ok(TransactionPlan { transaction, deltas })
    }

    /// Derives the deltas that undo a recorded transaction.
    ///
    /// Contractor payment twins only restore the treasury here; the full
    /// settlement reversal (agreement, contractor and project totals) is
    /// planned by the contracts module when the linked payment still exists.
    #[must_use]
    pub fn plan_delete(transaction: &Transaction) -> DeltaSet {
        let mut deltas = DeltaSet::new();
        match transaction.kind {
            TransactionKind::Deposit => {
                deltas.debit(
                    DeltaTarget::TreasuryBalance(transaction.treasury),
                    transaction.amount,
                );
                if let Some(project) = transaction.project {
                    deltas.debit(DeltaTarget::ProjectRevenue(project), transaction.amount);
                }
            }
            TransactionKind::Withdrawal => {
                deltas.credit(
                    DeltaTarget::TreasuryBalance(transaction.treasury),
                    transaction.amount,
                );
                if let Some(project) = transaction.project {
                    deltas.debit(DeltaTarget::ProjectExpenses(project), transaction.amount);
                }
            }
            TransactionKind::Transfer => {
                deltas.credit(
                    DeltaTarget::TreasuryBalance(transaction.treasury),
                    transaction.amount,
                );
                if let Some(target) = transaction.target_treasury {
                    deltas.debit(DeltaTarget::TreasuryBalance(target), transaction.amount);
                }
            }
            TransactionKind::ContractorPayment => {
                // Orphaned twin (payment record already gone): restore the
                // treasury debit only.
                deltas.credit(
                    DeltaTarget::TreasuryBalance(transaction.treasury),
                    transaction.amount,
                );
            }
        }
        deltas
    }

    /// Applies a descriptive-only update to a transaction record.
    ///
    /// Never touches amount, kind, treasuries or project, so no deltas are
    /// produced and applied balances stay untouched.
    pub fn apply_update(transaction: &mut Transaction, update: TransactionUpdate) {
        if let Some(description) = update.description {
            transaction.description = Some(description);
        }
        if let Some(date) = update.date {
            transaction.date = date;
        }
        if let Some(category) = update.category {
            transaction.category = Some(category);
        }
        if let Some(vendor) = update.vendor {
            transaction.vendor = Some(vendor);
        }
        if let Some(payment_method) = update.payment_method {
            transaction.payment_method = Some(payment_method);
        }
    }
}
