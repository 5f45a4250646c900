//! Contract settlement repository.

use chrono::Utc;
use mizan_core::contracts::{
    ContractAgreement, ContractPayment, ContractService, CreateAgreementInput, CreatePaymentInput,
};
use mizan_core::error::DomainError;
use mizan_shared::types::{AgreementId, PaymentId, ProjectId, UserId};
use rust_decimal::Decimal;

use crate::store::MemoryStore;

/// Repository for agreements and contractor payments.
#[derive(Debug, Clone)]
pub struct ContractRepository {
    store: MemoryStore,
}

impl ContractRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Records an agreement, crediting the contractor balance and the
    /// project's agreed total.
    pub async fn create_agreement(
        &self,
        input: CreateAgreementInput,
    ) -> Result<ContractAgreement, DomainError> {
        let mut state = self.store.write().await;

        if !state.projects.contains_key(&input.project) {
            return Err(DomainError::NotFound { entity: "project" });
        }
        if !state.contractors.contains_key(&input.contractor) {
            return Err(DomainError::NotFound {
                entity: "contractor",
            });
        }

        let plan = ContractService::plan_create_agreement(&input, Utc::now())?;
        state.apply_deltas(&plan.deltas)?;
        state
            .agreements
            .insert(plan.agreement.id, plan.agreement.clone());

        tracing::info!(
            agreement_id = %plan.agreement.id,
            agreed_amount = %plan.agreement.agreed_amount,
            "contract agreement recorded"
        );
        Ok(plan.agreement)
    }

    /// Changes an agreement's committed amount, shifting the dependent
    /// totals by the difference.
    pub async fn update_agreement(
        &self,
        id: AgreementId,
        new_agreed_amount: Decimal,
    ) -> Result<ContractAgreement, DomainError> {
        let mut state = self.store.write().await;
        let agreement = state
            .agreements
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;

        let plan = ContractService::plan_update_agreement(&agreement, new_agreed_amount)?;
        state.apply_deltas(&plan.deltas)?;
        let agreement = state
            .agreements
            .get_mut(&id)
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;
        agreement.agreed_amount = plan.new_agreed_amount;
        Ok(agreement.clone())
    }

    /// Deletes an agreement with no payments, reversing its creation.
    pub async fn delete_agreement(&self, id: AgreementId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        let agreement = state
            .agreements
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;
        let payment_count = state
            .payments
            .values()
            .filter(|payment| payment.agreement == id)
            .count();

        let reversal = ContractService::plan_delete_agreement(&agreement, payment_count)?;
        state.apply_deltas_lenient(&reversal);
        state.agreements.remove(&id);
        tracing::info!(agreement_id = %id, "contract agreement deleted");
        Ok(())
    }

    /// Lists agreements, optionally for one project.
    pub async fn list_agreements(&self, project: Option<ProjectId>) -> Vec<ContractAgreement> {
        let state = self.store.read().await;
        let mut agreements: Vec<ContractAgreement> = state
            .agreements
            .values()
            .filter(|agreement| project.is_none_or(|id| agreement.project == id))
            .cloned()
            .collect();
        agreements.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        agreements
    }

    /// Settles part of an agreement: four aggregates move together and a
    /// twin transaction is written, all under one guard.
    pub async fn create_payment(
        &self,
        input: CreatePaymentInput,
        recorded_by: Option<UserId>,
    ) -> Result<ContractPayment, DomainError> {
        let mut state = self.store.write().await;

        let agreement = state
            .agreements
            .get(&input.agreement)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;
        let treasury = state
            .treasuries
            .get(&input.treasury)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;
        let date = input.date.unwrap_or_else(Utc::now);
        let duplicate_exists = state.payments.values().any(|payment| {
            payment.agreement == input.agreement
                && payment.treasury == input.treasury
                && payment.amount == input.amount
                && payment.date == date
        });

        let plan = ContractService::plan_create_payment(
            &input,
            &agreement,
            &treasury,
            duplicate_exists,
            recorded_by,
            Utc::now(),
        )?;
        state.apply_deltas(&plan.deltas)?;
        state.payments.insert(plan.payment.id, plan.payment.clone());
        state.transactions.insert(plan.twin.id, plan.twin.clone());

        tracing::info!(
            payment_id = %plan.payment.id,
            agreement_id = %agreement.id,
            amount = %plan.payment.amount,
            "contractor payment settled"
        );
        Ok(plan.payment)
    }

    /// Replaces a payment: fully reverses the old one, then applies the new
    /// values, which may point at a different agreement or treasury.
    pub async fn update_payment(
        &self,
        id: PaymentId,
        input: CreatePaymentInput,
        recorded_by: Option<UserId>,
    ) -> Result<ContractPayment, DomainError> {
        let mut state = self.store.write().await;

        let old = state
            .payments
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract payment",
            })?;
        let agreement = state
            .agreements
            .get(&input.agreement)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;
        let treasury = state
            .treasuries
            .get(&input.treasury)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;

        // Reverse first, so re-paying the same agreement validates against
        // the restored remaining amount.
        let reversal = ContractService::plan_delete_payment(&old);
        state.apply_deltas_lenient(&reversal);
        state.payments.remove(&id);
        let old_twins: Vec<_> = state
            .transactions
            .values()
            .filter(|tx| tx.contract_payment == Some(id))
            .cloned()
            .collect();
        for twin in &old_twins {
            state.transactions.remove(&twin.id);
        }

        // Snapshots changed under the reversal; reload before planning.
        let agreement = state
            .agreements
            .get(&agreement.id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })?;
        let treasury = state
            .treasuries
            .get(&treasury.id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;

        // The replaced payment is already removed, so this scan only sees
        // other payments.
        let date = input.date.unwrap_or_else(Utc::now);
        let duplicate_exists = state.payments.values().any(|payment| {
            payment.agreement == input.agreement
                && payment.treasury == input.treasury
                && payment.amount == input.amount
                && payment.date == date
        });

        let plan = match ContractService::plan_create_payment(
            &input,
            &agreement,
            &treasury,
            duplicate_exists,
            recorded_by,
            Utc::now(),
        ) {
            Ok(plan) => plan,
            Err(err) => {
                // Put the old payment back; the update must not half-apply.
                state.apply_deltas_lenient(&reversal.inverted());
                state.payments.insert(old.id, old.clone());
                for twin in old_twins {
                    state.transactions.insert(twin.id, twin);
                }
                return Err(err);
            }
        };

        // Keep the payment's identity stable across the replacement.
        let mut payment = plan.payment;
        payment.id = id;
        let mut twin = plan.twin;
        twin.contract_payment = Some(id);

        state.apply_deltas(&plan.deltas)?;
        state.payments.insert(id, payment.clone());
        state.transactions.insert(twin.id, twin);

        tracing::info!(payment_id = %id, amount = %payment.amount, "contractor payment replaced");
        Ok(payment)
    }

    /// Deletes a payment, restoring all four aggregates and removing the
    /// twin transaction.
    pub async fn delete_payment(&self, id: PaymentId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        let payment = state
            .payments
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract payment",
            })?;

        let reversal = ContractService::plan_delete_payment(&payment);
        state.apply_deltas_lenient(&reversal);
        state.payments.remove(&id);
        let twins: Vec<_> = state
            .transactions
            .values()
            .filter(|tx| tx.contract_payment == Some(id))
            .map(|tx| tx.id)
            .collect();
        for twin_id in twins {
            state.transactions.remove(&twin_id);
        }

        tracing::info!(payment_id = %id, amount = %payment.amount, "contractor payment reversed");
        Ok(())
    }

    /// Lists payments, optionally for one agreement or project.
    pub async fn list_payments(
        &self,
        agreement: Option<AgreementId>,
        project: Option<ProjectId>,
    ) -> Vec<ContractPayment> {
        let state = self.store.read().await;
        let mut payments: Vec<ContractPayment> = state
            .payments
            .values()
            .filter(|payment| agreement.is_none_or(|id| payment.agreement == id))
            .filter(|payment| project.is_none_or(|id| payment.project == id))
            .cloned()
            .collect();
        payments.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        payments
    }

    /// Fetches one agreement.
    pub async fn get_agreement(&self, id: AgreementId) -> Result<ContractAgreement, DomainError> {
        let state = self.store.read().await;
        state
            .agreements
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "contract agreement",
            })
    }
}
