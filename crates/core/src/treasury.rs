//! Treasury accounts: company cash boxes and engineer custody accounts.

use chrono::{DateTime, Utc};
use mizan_shared::types::{ProjectId, TreasuryId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of treasury account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreasuryKind {
    /// A company cash box.
    Cash,
    /// Money held in custody by an engineer for a specific project.
    Custody,
}

/// A treasury account with a running balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Treasury {
    /// Unique identifier.
    pub id: TreasuryId,
    /// Unique display name.
    pub name: String,
    /// Balance the account was opened with.
    pub initial_balance: Decimal,
    /// Derived balance: `initial_balance` plus every applied delta.
    pub current_balance: Decimal,
    /// Cash box or custody account.
    pub kind: TreasuryKind,
    /// Free-form note.
    pub description: Option<String>,
    /// Engineer holding the custody money. Required for custody accounts.
    pub responsible_user: Option<UserId>,
    /// Project the custody belongs to. Required for custody accounts.
    pub project: Option<ProjectId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for opening a treasury.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTreasuryInput {
    /// Unique display name.
    pub name: String,
    /// Opening balance. Defaults to zero.
    #[serde(default)]
    pub initial_balance: Decimal,
    /// Cash box or custody account.
    pub kind: TreasuryKind,
    /// Free-form note.
    pub description: Option<String>,
    /// Engineer holding the custody money.
    pub responsible_user: Option<UserId>,
    /// Project the custody belongs to.
    pub project: Option<ProjectId>,
}

impl Treasury {
    /// Builds a treasury from validated input.
    ///
    /// Custody accounts must name a responsible engineer and a project.
    /// The opening balance becomes the current balance.
    pub fn create(input: CreateTreasuryInput, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "treasury name must not be empty".into(),
            ));
        }
        if input.kind == TreasuryKind::Custody {
            if input.responsible_user.is_none() {
                return Err(DomainError::Validation(
                    "custody treasury requires a responsible engineer".into(),
                ));
            }
            if input.project.is_none() {
                return Err(DomainError::Validation(
                    "custody treasury requires a project".into(),
                ));
            }
        }

        Ok(Self {
            id: TreasuryId::new(),
            name,
            initial_balance: input.initial_balance,
            current_balance: input.initial_balance,
            kind: input.kind,
            description: input.description,
            responsible_user: input.responsible_user,
            project: input.project,
            created_at: now,
        })
    }

    /// Changes the opening balance and shifts the current balance by the
    /// same difference, preserving every delta applied since opening.
    pub fn rebase_initial_balance(&mut self, new_initial: Decimal) {
        let shift = new_initial - self.initial_balance;
        self.initial_balance = new_initial;
        self.current_balance += shift;
    }

    /// Fails with [`DomainError::InsufficientBalance`] if a debit of
    /// `amount` would drive the balance negative.
    pub fn ensure_can_debit(&self, amount: Decimal) -> Result<(), DomainError> {
        if self.current_balance < amount {
            return Err(DomainError::InsufficientBalance {
                treasury: self.name.clone(),
                available: self.current_balance,
                required: amount,
            });
        }
        Ok(())
    }
}
