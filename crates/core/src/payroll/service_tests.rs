use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::ledger::TransactionKind;
use crate::mutation::DeltaTarget;
use crate::treasury::{CreateTreasuryInput, Treasury, TreasuryKind};
use mizan_shared::types::CategoryId;

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

fn input(kind: SalaryTransactionKind, amount: Decimal) -> CreateSalaryTransactionInput {
    CreateSalaryTransactionInput {
        employee: mizan_shared::types::EmployeeId::new(),
        kind,
        amount,
        description: None,
        treasury: None,
        date: None,
    }
}

#[test]
fn test_bonus_entry_moves_no_money() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let plan = PayrollService::plan_create(
        &input(SalaryTransactionKind::Bonus, dec!(500)),
        &employee,
        None,
        None,
        None,
        Utc::now(),
    )
    .unwrap();

    assert!(plan.twin.is_none());
    assert!(plan.deltas.is_empty());
    assert_eq!(plan.entry.salary_before, dec!(5000));
    assert_eq!(plan.entry.salary_after, dec!(5500));
}

#[test]
fn test_salary_disbursement_debits_treasury_and_writes_twin() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let treasury = treasury(dec!(10000));
    let category = CategoryId::new();

    let plan = PayrollService::plan_create(
        &input(SalaryTransactionKind::Salary, dec!(-5000)),
        &employee,
        Some(&treasury),
        Some(category),
        None,
        Utc::now(),
    )
    .unwrap();

    assert_eq!(
        plan.deltas.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(-5000)
    );
    let twin = plan.twin.unwrap();
    assert_eq!(twin.kind, TransactionKind::Withdrawal);
    assert_eq!(twin.amount, dec!(5000));
    assert_eq!(twin.category, Some(category));
    assert!(twin.description.unwrap().contains("Ahmed"));
}

#[test]
fn test_salary_disbursement_requires_funds() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let treasury = treasury(dec!(1000));

    let err = PayrollService::plan_create(
        &input(SalaryTransactionKind::Salary, dec!(-5000)),
        &employee,
        Some(&treasury),
        None,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "INSUFFICIENT_BALANCE");
}

#[test]
fn test_non_salary_kinds_ignore_treasury() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let treasury = treasury(dec!(10000));

    let plan = PayrollService::plan_create(
        &input(SalaryTransactionKind::Commission, dec!(750)),
        &employee,
        Some(&treasury),
        None,
        None,
        Utc::now(),
    )
    .unwrap();
    assert!(plan.twin.is_none());
    assert!(plan.deltas.is_empty());
}

#[test]
fn test_zero_amount_rejected() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let err = PayrollService::plan_create(
        &input(SalaryTransactionKind::Bonus, Decimal::ZERO),
        &employee,
        None,
        None,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_apply_update_changes_entry_fields_only() {
    let employee = Employee::new("Ahmed".into(), None, dec!(5000), Utc::now());
    let mut entry = PayrollService::plan_create(
        &input(SalaryTransactionKind::Bonus, dec!(500)),
        &employee,
        None,
        None,
        None,
        Utc::now(),
    )
    .unwrap()
    .entry;

    PayrollService::apply_update(
        &mut entry,
        SalaryTransactionUpdate {
            amount: Some(dec!(300)),
            description: Some("reduced bonus".into()),
            ..SalaryTransactionUpdate::default()
        },
    );
    assert_eq!(entry.amount, dec!(300));
    assert_eq!(entry.description.as_deref(), Some("reduced bonus"));
}
