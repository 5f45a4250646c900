//! Core business logic for Mizan.
//!
//! This crate contains pure business logic with ZERO web or storage
//! dependencies. Every financial operation is expressed as a *plan*: the
//! records to write plus a [`mutation::DeltaSet`] of signed balance deltas,
//! computed from snapshots of the touched aggregates. The store layer loads
//! the snapshots, invokes the planning functions here, and commits the whole
//! plan atomically.
//!
//! # Modules
//!
//! - `mutation` - The balance mutation primitive (apply/reverse delta sets)
//! - `treasury` - Cash and custody accounts with running balances
//! - `project` - Project aggregates (revenue/expense/contractor totals)
//! - `ledger` - Deposit/withdrawal/transfer transaction rules
//! - `contracts` - Contractor agreements and payment settlement
//! - `sales` - Sales invoices, partial payments, and returns
//! - `inventory` - Stock operations and the on-hand quantity fold
//! - `payroll` - Per-employee salary transaction chains

pub mod contracts;
pub mod error;
pub mod inventory;
pub mod ledger;
pub mod mutation;
pub mod payroll;
pub mod project;
pub mod sales;
pub mod treasury;

pub use error::DomainError;
