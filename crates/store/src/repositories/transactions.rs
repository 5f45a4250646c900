//! Ledger transaction repository.

use chrono::Utc;
use mizan_core::contracts::ContractService;
use mizan_core::error::DomainError;
use mizan_core::ledger::{
    CreateTransactionInput, LedgerService, Transaction, TransactionKind, TransactionUpdate,
};
use mizan_shared::types::{ProjectId, TransactionId, TreasuryId, UserId};

use crate::scope::Scope;
use crate::store::MemoryStore;

/// Repository for ledger transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    store: MemoryStore,
}

impl TransactionRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Records a deposit, withdrawal or transfer.
    ///
    /// Everything is resolved and validated before any balance moves, so an
    /// error here means nothing changed.
    pub async fn create(
        &self,
        input: CreateTransactionInput,
        recorded_by: Option<UserId>,
    ) -> Result<Transaction, DomainError> {
        let mut state = self.store.write().await;

        let source = state
            .treasuries
            .get(&input.treasury)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;
        let target = match input.target_treasury {
            Some(id) => Some(
                state
                    .treasuries
                    .get(&id)
                    .cloned()
                    .ok_or(DomainError::NotFound { entity: "treasury" })?,
            ),
            None => None,
        };
        if let Some(project) = input.project {
            if !state.projects.contains_key(&project) {
                return Err(DomainError::NotFound { entity: "project" });
            }
        }

        let plan =
            LedgerService::plan_create(&input, &source, target.as_ref(), recorded_by, Utc::now())?;
        state.apply_deltas(&plan.deltas)?;
        state
            .transactions
            .insert(plan.transaction.id, plan.transaction.clone());

        tracing::info!(
            transaction_id = %plan.transaction.id,
            kind = ?plan.transaction.kind,
            amount = %plan.transaction.amount,
            treasury_id = %plan.transaction.treasury,
            "transaction recorded"
        );
        Ok(plan.transaction)
    }

    /// Fetches one transaction visible to the caller.
    pub async fn get(&self, id: TransactionId, scope: &Scope) -> Result<Transaction, DomainError> {
        let state = self.store.read().await;
        let tx = state
            .transactions
            .get(&id)
            .ok_or(DomainError::NotFound {
                entity: "transaction",
            })?;
        if !Self::visible(&state, tx, scope) {
            return Err(DomainError::NotFound {
                entity: "transaction",
            });
        }
        Ok(tx.clone())
    }

    /// Lists transactions visible to the caller, newest first, optionally
    /// filtered by treasury or project.
    pub async fn list(
        &self,
        scope: &Scope,
        treasury: Option<TreasuryId>,
        project: Option<ProjectId>,
    ) -> Vec<Transaction> {
        let state = self.store.read().await;
        let mut transactions: Vec<Transaction> = state
            .transactions
            .values()
            .filter(|tx| treasury.is_none_or(|id| tx.treasury == id || tx.target_treasury == Some(id)))
            .filter(|tx| project.is_none_or(|id| tx.project == Some(id)))
            .filter(|tx| Self::visible(&state, tx, scope))
            .cloned()
            .collect();
        transactions.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        transactions
    }

    /// Updates a transaction's descriptive fields. Balances never move.
    pub async fn update(
        &self,
        id: TransactionId,
        update: TransactionUpdate,
    ) -> Result<Transaction, DomainError> {
        let mut state = self.store.write().await;
        let tx = state
            .transactions
            .get_mut(&id)
            .ok_or(DomainError::NotFound {
                entity: "transaction",
            })?;
        LedgerService::apply_update(tx, update);
        Ok(tx.clone())
    }

    /// Deletes a transaction, reversing its balance effects exactly.
    ///
    /// A contractor payment twin cascades into the full settlement
    /// reversal: the payment record is removed and all four aggregates are
    /// restored. Reversal deltas are applied leniently; a treasury deleted
    /// since must not make its history immortal.
    pub async fn delete(&self, id: TransactionId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        let tx = state
            .transactions
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "transaction",
            })?;

        if tx.kind == TransactionKind::ContractorPayment {
            if let Some(payment) = tx
                .contract_payment
                .and_then(|payment_id| state.payments.get(&payment_id).cloned())
            {
                let reversal = ContractService::plan_delete_payment(&payment);
                state.apply_deltas_lenient(&reversal);
                state.payments.remove(&payment.id);
                state.transactions.remove(&id);
                tracing::info!(
                    transaction_id = %id,
                    payment_id = %payment.id,
                    "contractor payment reversed via its twin transaction"
                );
                return Ok(());
            }
        }

        let reversal = LedgerService::plan_delete(&tx);
        state.apply_deltas_lenient(&reversal);
        state.transactions.remove(&id);
        tracing::info!(transaction_id = %id, kind = ?tx.kind, "transaction deleted and reversed");
        Ok(())
    }

    fn visible(state: &crate::state::State, tx: &Transaction, scope: &Scope) -> bool {
        if scope.sees_everything() {
            return true;
        }
        let treasury_visible = state
            .treasuries
            .get(&tx.treasury)
            .is_some_and(|treasury| scope.can_view_treasury(treasury));
        let project_visible = tx.project.is_some_and(|id| {
            state
                .projects
                .get(&id)
                .is_some_and(|project| scope.can_view_project(project))
        });
        treasury_visible || project_visible
    }
}
