//! Treasury ledger logic.
//!
//! This module implements the transaction rules:
//! - Deposits, withdrawals and transfers between treasuries
//! - Balance delta planning for creation and exact reversal on delete
//! - The descriptive-field-only update policy

pub mod service;
pub mod types;


pub use service::{LedgerService, TransactionPlan};
pub use types::{
    Category, CreateTransactionInput, Transaction, TransactionKind, TransactionUpdate,
};
