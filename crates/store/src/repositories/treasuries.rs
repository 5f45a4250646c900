//! Treasury repository.

use chrono::Utc;
use mizan_core::error::DomainError;
use mizan_core::ledger::{Transaction, TransactionKind};
use mizan_core::treasury::{CreateTreasuryInput, Treasury};
use mizan_shared::types::{ProjectId, TreasuryId, UserId};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::scope::Scope;
use crate::store::MemoryStore;

/// Fields a treasury update may change.
///
/// The kind is fixed at creation; changing the opening balance shifts the
/// current balance by the same difference.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTreasuryInput {
    /// New unique name.
    pub name: Option<String>,
    /// New note.
    pub description: Option<String>,
    /// New opening balance.
    pub initial_balance: Option<Decimal>,
    /// New responsible engineer, for custody accounts.
    pub responsible_user: Option<UserId>,
    /// New project, for custody accounts.
    pub project: Option<ProjectId>,
}

/// A treasury with its ledger history and totals.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TreasuryDetails {
    /// The treasury itself.
    pub treasury: Treasury,
    /// Its transactions, newest first.
    pub transactions: Vec<Transaction>,
    /// Total money that entered: deposits and incoming transfers.
    pub total_in: Decimal,
    /// Total money that left: withdrawals, payments, outgoing transfers.
    pub total_out: Decimal,
}

/// Repository for treasury accounts.
#[derive(Debug, Clone)]
pub struct TreasuryRepository {
    store: MemoryStore,
}

impl TreasuryRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Opens a treasury.
    ///
    /// # Errors
    ///
    /// `DuplicateReference` for a taken name, `Validation` for malformed
    /// custody input, `NotFound` for a custody project that does not exist.
    pub async fn create(&self, input: CreateTreasuryInput) -> Result<Treasury, DomainError> {
        let mut state = self.store.write().await;

        if state
            .treasuries
            .values()
            .any(|t| t.name.eq_ignore_ascii_case(input.name.trim()))
        {
            return Err(DomainError::DuplicateReference(format!(
                "treasury name '{}' is taken",
                input.name.trim()
            )));
        }
        if let Some(project) = input.project {
            if !state.projects.contains_key(&project) {
                return Err(DomainError::NotFound { entity: "project" });
            }
        }

        let treasury = Treasury::create(input, Utc::now())?;
        tracing::info!(treasury_id = %treasury.id, name = %treasury.name, "treasury created");
        state.treasuries.insert(treasury.id, treasury.clone());
        Ok(treasury)
    }

    /// Fetches one treasury visible to the caller.
    pub async fn get(&self, id: TreasuryId, scope: &Scope) -> Result<Treasury, DomainError> {
        let state = self.store.read().await;
        state
            .treasuries
            .get(&id)
            .filter(|treasury| scope.can_view_treasury(treasury))
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })
    }

    /// Lists treasuries visible to the caller, sorted by name.
    pub async fn list(&self, scope: &Scope) -> Vec<Treasury> {
        let state = self.store.read().await;
        let mut treasuries: Vec<Treasury> = state
            .treasuries
            .values()
            .filter(|treasury| scope.can_view_treasury(treasury))
            .cloned()
            .collect();
        treasuries.sort_by(|a, b| a.name.cmp(&b.name));
        treasuries
    }

    /// Updates a treasury's descriptive fields and opening balance.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id, `DuplicateReference` for a taken name.
    pub async fn update(
        &self,
        id: TreasuryId,
        input: UpdateTreasuryInput,
    ) -> Result<Treasury, DomainError> {
        let mut state = self.store.write().await;

        if let Some(name) = &input.name {
            if state
                .treasuries
                .values()
                .any(|t| t.id != id && t.name.eq_ignore_ascii_case(name.trim()))
            {
                return Err(DomainError::DuplicateReference(format!(
                    "treasury name '{}' is taken",
                    name.trim()
                )));
            }
        }

        let treasury = state
            .treasuries
            .get_mut(&id)
            .ok_or(DomainError::NotFound { entity: "treasury" })?;

        if let Some(name) = input.name {
            treasury.name = name.trim().to_owned();
        }
        if let Some(description) = input.description {
            treasury.description = Some(description);
        }
        if let Some(responsible_user) = input.responsible_user {
            treasury.responsible_user = Some(responsible_user);
        }
        if let Some(project) = input.project {
            treasury.project = Some(project);
        }
        if let Some(initial_balance) = input.initial_balance {
            treasury.rebase_initial_balance(initial_balance);
        }

        Ok(treasury.clone())
    }

    /// Deletes a treasury with no ledger history.
    ///
    /// # Errors
    ///
    /// `HasDependentRecords` while any transaction references it as source
    /// or transfer target.
    pub async fn delete(&self, id: TreasuryId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;

        if !state.treasuries.contains_key(&id) {
            return Err(DomainError::NotFound { entity: "treasury" });
        }
        let references = state
            .transactions
            .values()
            .filter(|tx| tx.treasury == id || tx.target_treasury == Some(id))
            .count();
        if references > 0 {
            return Err(DomainError::HasDependentRecords(format!(
                "treasury has {references} transactions"
            )));
        }

        state.treasuries.remove(&id);
        tracing::info!(treasury_id = %id, "treasury deleted");
        Ok(())
    }

    /// A treasury with its full ledger history and in/out totals.
    pub async fn details(
        &self,
        id: TreasuryId,
        scope: &Scope,
    ) -> Result<TreasuryDetails, DomainError> {
        let state = self.store.read().await;
        let treasury = state
            .treasuries
            .get(&id)
            .filter(|treasury| scope.can_view_treasury(treasury))
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;

        let mut transactions: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|tx| tx.treasury == id || tx.target_treasury == Some(id))
            .cloned()
            .collect();
        transactions.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));

        let mut total_in = Decimal::ZERO;
        let mut total_out = Decimal::ZERO;
        for tx in &transactions {
            match tx.kind {
                TransactionKind::Deposit => total_in += tx.amount,
                TransactionKind::Withdrawal | TransactionKind::ContractorPayment => {
                    total_out += tx.amount;
                }
                TransactionKind::Transfer => {
                    if tx.treasury == id {
                        total_out += tx.amount;
                    } else {
                        total_in += tx.amount;
                    }
                }
            }
        }

        Ok(TreasuryDetails {
            treasury,
            transactions,
            total_in,
            total_out,
        })
    }
}
