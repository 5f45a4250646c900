use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::mutation::DeltaTarget;
use crate::treasury::{CreateTreasuryInput, Treasury, TreasuryKind};
use mizan_shared::types::{ContractorId, ProjectId};

fn treasury(balance: Decimal) -> Treasury {
    Treasury::create(
        CreateTreasuryInput {
            name: "Main Safe".into(),
            initial_balance: balance,
            kind: TreasuryKind::Cash,
            description: None,
            responsible_user: None,
            project: None,
        },
        Utc::now(),
    )
    .unwrap()
}

fn agreement(agreed: Decimal, paid: Decimal) -> ContractAgreement {
    let plan = ContractService::plan_create_agreement(
        &CreateAgreementInput {
            project: ProjectId::new(),
            contractor: ContractorId::new(),
            description: Some("tiling works".into()),
            agreed_amount: agreed,
            date: None,
        },
        Utc::now(),
    )
    .unwrap();
    let mut agreement = plan.agreement;
    agreement.paid_amount = paid;
    agreement
}

fn payment_input(agreement: &ContractAgreement, treasury: &Treasury, amount: Decimal) -> CreatePaymentInput {
    CreatePaymentInput {
        agreement: agreement.id,
        treasury: treasury.id,
        amount,
        description: None,
        date: None,
    }
}

#[test]
fn test_create_agreement_credits_contractor_and_project() {
    let plan = ContractService::plan_create_agreement(
        &CreateAgreementInput {
            project: ProjectId::new(),
            contractor: ContractorId::new(),
            description: None,
            agreed_amount: dec!(50000),
            date: None,
        },
        Utc::now(),
    )
    .unwrap();

    let agreement = &plan.agreement;
    assert_eq!(agreement.paid_amount, Decimal::ZERO);
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ContractorBalance(agreement.contractor)),
        dec!(50000)
    );
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ProjectAgreed(agreement.project)),
        dec!(50000)
    );
}

#[test]
fn test_update_agreement_propagates_difference() {
    let agreement = agreement(dec!(50000), dec!(10000));
    let plan = ContractService::plan_update_agreement(&agreement, dec!(45000)).unwrap();

    assert_eq!(plan.new_agreed_amount, dec!(45000));
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ContractorBalance(agreement.contractor)),
        dec!(-5000)
    );
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ProjectAgreed(agreement.project)),
        dec!(-5000)
    );
}

#[test]
fn test_update_agreement_rejects_shrink_below_paid() {
    let agreement = agreement(dec!(50000), dec!(30000));
    let err = ContractService::plan_update_agreement(&agreement, dec!(25000)).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_delete_agreement_blocked_by_payments() {
    let agreement = agreement(dec!(50000), dec!(10000));
    let err = ContractService::plan_delete_agreement(&agreement, 2).unwrap_err();
    assert_eq!(err.error_code(), "HAS_DEPENDENT_RECORDS");
}

#[test]
fn test_delete_agreement_reverses_creation() {
    let agreement = agreement(dec!(50000), Decimal::ZERO);
    let deltas = ContractService::plan_delete_agreement(&agreement, 0).unwrap();
    assert_eq!(
        deltas.net_for(DeltaTarget::ContractorBalance(agreement.contractor)),
        dec!(-50000)
    );
    assert_eq!(
        deltas.net_for(DeltaTarget::ProjectAgreed(agreement.project)),
        dec!(-50000)
    );
}

#[test]
fn test_payment_settles_four_aggregates() {
    let agreement = agreement(dec!(50000), dec!(10000));
    let treasury = treasury(dec!(20000));
    let plan = ContractService::plan_create_payment(
        &payment_input(&agreement, &treasury, dec!(12500)),
        &agreement,
        &treasury,
        false,
        None,
        Utc::now(),
    )
    .unwrap();

    assert_eq!(
        plan.deltas.net_for(DeltaTarget::AgreementPaid(agreement.id)),
        dec!(12500)
    );
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ContractorBalance(agreement.contractor)),
        dec!(-12500)
    );
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(-12500)
    );
    assert_eq!(
        plan.deltas
            .net_for(DeltaTarget::ProjectPaid(agreement.project)),
        dec!(12500)
    );

    let twin = &plan.twin;
    assert_eq!(twin.kind, crate::ledger::TransactionKind::ContractorPayment);
    assert_eq!(twin.contract_payment, Some(plan.payment.id));
    assert_eq!(twin.project, Some(agreement.project));
    assert_eq!(twin.amount, dec!(12500));
}

#[test]
fn test_payment_rejects_overpay() {
    let agreement = agreement(dec!(50000), dec!(45000));
    let treasury = treasury(dec!(100000));
    let err = ContractService::plan_create_payment(
        &payment_input(&agreement, &treasury, dec!(6000)),
        &agreement,
        &treasury,
        false,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "REMAINING_AMOUNT_EXCEEDED");
}

#[test]
fn test_payment_rejects_insufficient_treasury() {
    let agreement = agreement(dec!(50000), Decimal::ZERO);
    let treasury = treasury(dec!(1000));
    let err = ContractService::plan_create_payment(
        &payment_input(&agreement, &treasury, dec!(1500)),
        &agreement,
        &treasury,
        false,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
}

#[test]
fn test_payment_rejects_duplicate_submission() {
    let agreement = agreement(dec!(50000), Decimal::ZERO);
    let treasury = treasury(dec!(10000));
    let err = ContractService::plan_create_payment(
        &payment_input(&agreement, &treasury, dec!(1000)),
        &agreement,
        &treasury,
        true,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "DUPLICATE_REFERENCE");
}

#[test]
fn test_delete_payment_is_exact_inverse() {
    let agreement = agreement(dec!(50000), Decimal::ZERO);
    let treasury = treasury(dec!(10000));
    let plan = ContractService::plan_create_payment(
        &payment_input(&agreement, &treasury, dec!(4000)),
        &agreement,
        &treasury,
        false,
        None,
        Utc::now(),
    )
    .unwrap();

    let reversal = ContractService::plan_delete_payment(&plan.payment);
    assert_eq!(reversal, plan.deltas.inverted());
}
