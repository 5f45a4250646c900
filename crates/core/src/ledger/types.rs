//! Ledger domain types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{
    CategoryId, PaymentId, ProjectId, SaleId, TransactionId, TreasuryId, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// Money entering a treasury.
    Deposit,
    /// Money leaving a treasury.
    Withdrawal,
    /// Money moving between two treasuries.
    Transfer,
    /// Twin row written by contract settlement. Never created directly.
    ContractorPayment,
}

/// A single ledger transaction against a treasury.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Treasury the money moved in or out of (source for transfers).
    pub treasury: TreasuryId,
    /// Target treasury, for transfers only.
    pub target_treasury: Option<TreasuryId>,
    /// Project whose revenue/expense totals this transaction feeds.
    pub project: Option<ProjectId>,
    /// Deposit, withdrawal, transfer or contractor payment twin.
    pub kind: TransactionKind,
    /// Always positive; the kind carries the direction.
    pub amount: Decimal,
    /// Free-form description.
    pub description: Option<String>,
    /// Expense category.
    pub category: Option<CategoryId>,
    /// Vendor or payee name.
    pub vendor: Option<String>,
    /// Payment method label ("cash", "bank transfer", ...).
    pub payment_method: Option<String>,
    /// Contract payment this row is the twin of.
    pub contract_payment: Option<PaymentId>,
    /// Sales invoice this row is the twin of.
    pub sale: Option<SaleId>,
    /// User who recorded the transaction.
    pub recorded_by: Option<UserId>,
    /// Business date of the transaction.
    pub date: DateTime<Utc>,
    /// Creation timestamp; tiebreaker for same-date ordering.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a ledger transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionInput {
    /// Source treasury.
    pub treasury: TreasuryId,
    /// Target treasury, for transfers.
    pub target_treasury: Option<TreasuryId>,
    /// Project to attribute the amount to.
    pub project: Option<ProjectId>,
    /// Deposit, withdrawal or transfer.
    pub kind: TransactionKind,
    /// Amount to move. Must be positive.
    pub amount: Decimal,
    /// Free-form description.
    pub description: Option<String>,
    /// Expense category.
    pub category: Option<CategoryId>,
    /// Vendor or payee name.
    pub vendor: Option<String>,
    /// Payment method label.
    pub payment_method: Option<String>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Descriptive fields a transaction update may change.
///
/// Financial fields (amount, kind, treasuries, project) are immutable once
/// applied; correcting them means deleting the transaction and recording a
/// new one, so the reversal stays exact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    /// New description.
    pub description: Option<String>,
    /// New business date.
    pub date: Option<DateTime<Utc>>,
    /// New expense category.
    pub category: Option<CategoryId>,
    /// New vendor name.
    pub vendor: Option<String>,
    /// New payment method label.
    pub payment_method: Option<String>,
}

/// An expense category for classifying withdrawals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
    /// Free-form note.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
