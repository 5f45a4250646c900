//! Contract settlement domain types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{AgreementId, ContractorId, PaymentId, ProjectId, TreasuryId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A subcontractor the company owes money to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contractor {
    /// Unique identifier.
    pub id: ContractorId,
    /// Unique display name.
    pub name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Trade specialty ("plumbing", "electrical", ...).
    pub specialty: Option<String>,
    /// Derived: agreed-but-unpaid money across all agreements.
    pub balance: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Contractor {
    /// Creates a contractor with a zero balance.
    #[must_use]
    pub fn new(
        name: String,
        phone: Option<String>,
        specialty: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ContractorId::new(),
            name,
            phone,
            specialty,
            balance: Decimal::ZERO,
            created_at: now,
        }
    }
}

/// A commitment to pay a contractor for work on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractAgreement {
    /// Unique identifier.
    pub id: AgreementId,
    /// Project the work belongs to.
    pub project: ProjectId,
    /// Contractor performing the work.
    pub contractor: ContractorId,
    /// Scope of the agreed work.
    pub description: Option<String>,
    /// Total committed amount.
    pub agreed_amount: Decimal,
    /// Derived: amount settled so far.
    pub paid_amount: Decimal,
    /// Business date of the agreement.
    pub date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ContractAgreement {
    /// Amount still owed under this agreement.
    #[must_use]
    pub fn remaining_amount(&self) -> Decimal {
        self.agreed_amount - self.paid_amount
    }
}

/// A settlement of part of an agreement out of a treasury.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractPayment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Agreement being settled.
    pub agreement: AgreementId,
    /// Denormalized from the agreement for project-scoped listings.
    pub project: ProjectId,
    /// Denormalized from the agreement.
    pub contractor: ContractorId,
    /// Treasury the money left.
    pub treasury: TreasuryId,
    /// Amount settled. Always positive.
    pub amount: Decimal,
    /// Free-form note.
    pub description: Option<String>,
    /// Business date of the payment.
    pub date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a contract agreement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAgreementInput {
    /// Project the work belongs to.
    pub project: ProjectId,
    /// Contractor performing the work.
    pub contractor: ContractorId,
    /// Scope of the agreed work.
    pub description: Option<String>,
    /// Total committed amount. Must be positive.
    pub agreed_amount: Decimal,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// Input for settling part of an agreement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentInput {
    /// Agreement being settled.
    pub agreement: AgreementId,
    /// Treasury to pay out of.
    pub treasury: TreasuryId,
    /// Amount to settle. Must be positive.
    pub amount: Decimal,
    /// Free-form note.
    pub description: Option<String>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}
