//! Settlement planning for agreements and contractor payments.

use chrono::{DateTime, Utc};
use mizan_shared::types::{AgreementId, PaymentId, TransactionId, UserId};
use rust_decimal::Decimal;

use super::types::{
    ContractAgreement, ContractPayment, CreateAgreementInput, CreatePaymentInput,
};
use crate::error::DomainError;
use crate::ledger::{Transaction, TransactionKind};
use crate::mutation::{DeltaSet, DeltaTarget};
use crate::treasury::Treasury;

/// A validated agreement ready to commit.
#[derive(Debug, Clone)]
pub struct AgreementPlan {
    /// The agreement record to insert.
    pub agreement: ContractAgreement,
    /// Credits the contractor balance and the project's agreed total.
    pub deltas: DeltaSet,
}

/// A validated agreement amount change.
#[derive(Debug, Clone)]
pub struct AgreementUpdatePlan {
    /// The new agreed amount to write.
    pub new_agreed_amount: Decimal,
    /// Shifts contractor balance and project agreed total by the difference.
    pub deltas: DeltaSet,
}

/// A validated contractor payment ready to commit.
#[derive(Debug, Clone)]
pub struct PaymentPlan {
    /// The payment record to insert.
    pub payment: ContractPayment,
    /// The twin ledger transaction recording the treasury debit.
    pub twin: Transaction,
    /// Touches agreement, contractor, treasury and project in one set.
    pub deltas: DeltaSet,
}

/// Planning functions for contract settlement.
pub struct ContractService;

impl ContractService {
    /// Validates a new agreement and derives its balance deltas.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a non-positive agreed amount.
    pub fn plan_create_agreement(
        input: &CreateAgreementInput,
        now: DateTime<Utc>,
    ) -> Result<AgreementPlan, DomainError> {
        if input.agreed_amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "agreed amount must be positive".into(),
            ));
        }

        let agreement = ContractAgreement {
            id: AgreementId::new(),
            project: input.project,
            contractor: input.contractor,
            description: input.description.clone(),
            agreed_amount: input.agreed_amount,
            paid_amount: Decimal::ZERO,
            date: input.date.unwrap_or(now),
            created_at: now,
        };

        let mut deltas = DeltaSet::new();
        deltas.credit(
            DeltaTarget::ContractorBalance(agreement.contractor),
            agreement.agreed_amount,
        );
        deltas.credit(
            DeltaTarget::ProjectAgreed(agreement.project),
            agreement.agreed_amount,
        );

        Ok(AgreementPlan { agreement, deltas })
    }

    /// Plans changing an agreement's committed amount.
    ///
    /// The difference is propagated to the contractor balance and the
    /// project's agreed total. Shrinking below what was already paid is
    /// rejected so `remaining_amount` never goes negative.
    ///
    /// # Errors
    ///
    /// Returns `Validation` for a non-positive amount or one below
    /// `paid_amount`.
    pub fn plan_update_agreement(
        agreement: &ContractAgreement,
        new_agreed_amount: Decimal,
    ) -> Result<AgreementUpdatePlan, DomainError> {
        if new_agreed_amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "agreed amount must be positive".into(),
            ));
        }
        if new_agreed_amount < agreement.paid_amount {
            return Err(DomainError::Validation(format!(
                "agreed amount {new_agreed_amount} cannot drop below paid amount {}",
                agreement.paid_amount
            )));
        }

        let difference = new_agreed_amount - agreement.agreed_amount;
        let mut deltas = DeltaSet::new();
        deltas.credit(
            DeltaTarget::ContractorBalance(agreement.contractor),
            difference,
        );
        deltas.credit(DeltaTarget::ProjectAgreed(agreement.project), difference);

        Ok(AgreementUpdatePlan {
            new_agreed_amount,
            deltas,
        })
    }

    /// Plans deleting an agreement.
    ///
    /// # Errors
    ///
    /// Returns `HasDependentRecords` while payments still reference the
    /// agreement; they must be deleted (and thereby reversed) first.
    pub fn plan_delete_agreement(
        agreement: &ContractAgreement,
        payment_count: usize,
    ) -> Result<DeltaSet, DomainError> {
        if payment_count > 0 {
            return Err(DomainError::HasDependentRecords(format!(
                "agreement has {payment_count} recorded payments"
            )));
        }

        let mut deltas = DeltaSet::new();
        deltas.debit(
            DeltaTarget::ContractorBalance(agreement.contractor),
            agreement.agreed_amount,
        );
        deltas.debit(
            DeltaTarget::ProjectAgreed(agreement.project),
            agreement.agreed_amount,
        );
        Ok(deltas)
    }

    /// Validates a contractor payment and derives the full settlement.
    ///
    /// One payment moves four aggregates together: the agreement's paid
    /// amount and the project's paid total go up, the contractor balance
    /// and the treasury go down. A twin ledger transaction records the
    /// treasury debit.
    ///
    /// `duplicate_exists` is true when a payment with the same agreement,
    /// amount and date is already recorded (double-submit guard).
    ///
    /// # Errors
    ///
    /// - `Validation` for non-positive amounts
    /// - `DuplicateReference` when `duplicate_exists`
    /// - `RemainingAmountExceeded` when the amount overpays the agreement
    /// - `InsufficientBalance` when the treasury cannot cover it
    pub fn plan_create_payment(
        input: &CreatePaymentInput,
        agreement: &ContractAgreement,
        treasury: &Treasury,
        duplicate_exists: bool,
        recorded_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<PaymentPlan, DomainError> {
        // 1. Shape checks before touching any aggregate.
        if input.amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "payment amount must be positive".into(),
            ));
        }
        if duplicate_exists {
            return Err(DomainError::DuplicateReference(
                "an identical payment for this agreement was already recorded".into(),
            ));
        }

        // 2. The payment must fit what is still owed.
        let remaining = agreement.remaining_amount();
        if input.amount > remaining {
            return Err(DomainError::RemainingAmountExceeded {
                remaining,
                requested: input.amount,
            });
        }

        // 3. The treasury must cover the debit.
        treasury.ensure_can_debit(input.amount)?;

        // 4. Build the records and the four-aggregate delta set.
        let date = input.date.unwrap_or(now);
        let payment = ContractPayment {
            id: PaymentId::new(),
            agreement: agreement.id,
            project: agreement.project,
            contractor: agreement.contractor,
            treasury: treasury.id,
            amount: input.amount,
            description: input.description.clone(),
            date,
            created_at: now,
        };

        let twin = Transaction {
            id: TransactionId::new(),
            treasury: treasury.id,
            target_treasury: None,
            project: Some(agreement.project),
            kind: TransactionKind::ContractorPayment,
            amount: input.amount,
            description: input.description.clone(),
            category: None,
            vendor: None,
            payment_method: None,
            contract_payment: Some(payment.id),
            sale: None,
            recorded_by,
            date,
            created_at: now,
        };

        let deltas = Self::settlement_deltas(&payment);

        Ok(PaymentPlan {
            payment,
            twin,
            deltas,
        })
    }

    /// Derives the deltas that undo a recorded payment exactly.
    ///
    /// The caller also removes the payment record and its twin transaction.
    #[must_use]
    pub fn plan_delete_payment(payment: &ContractPayment) -> DeltaSet {
        Self::settlement_deltas(payment).inverted()
    }

    fn settlement_deltas(payment: &ContractPayment) -> DeltaSet {
        let mut deltas = DeltaSet::new();
        deltas.credit(DeltaTarget::AgreementPaid(payment.agreement), payment.amount);
        deltas.debit(
            DeltaTarget::ContractorBalance(payment.contractor),
            payment.amount,
        );
        deltas.debit(DeltaTarget::TreasuryBalance(payment.treasury), payment.amount);
        deltas.credit(DeltaTarget::ProjectPaid(payment.project), payment.amount);
        deltas
    }
}
