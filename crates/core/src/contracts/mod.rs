//! Contractor agreements and payment settlement.
//!
//! An agreement commits a project to paying a contractor; each payment
//! settles part of it atomically across four aggregates (agreement,
//! contractor, treasury, project) and writes a twin ledger transaction.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_tests;

pub use service::{AgreementPlan, AgreementUpdatePlan, ContractService, PaymentPlan};
pub use types::{
    ContractAgreement, ContractPayment, Contractor, CreateAgreementInput, CreatePaymentInput,
};
