//! The document collections and delta application.

use std::collections::HashMap;

use mizan_core::contracts::{ContractAgreement, ContractPayment, Contractor};
use mizan_core::error::DomainError;
use mizan_core::inventory::{Product, StockOperation, Warehouse};
use mizan_core::ledger::{Category, Transaction};
use mizan_core::mutation::{DeltaSet, DeltaTarget};
use mizan_core::payroll::{Employee, SalaryTransaction};
use mizan_core::project::Project;
use mizan_core::sales::{Sale, SaleReturn};
use mizan_core::treasury::Treasury;
use mizan_shared::types::{
    AgreementId, CategoryId, ContractorId, EmployeeId, PaymentId, ProductId, ProjectId, SaleId,
    SaleReturnId, SalaryTransactionId, StockOperationId, TransactionId, TreasuryId, WarehouseId,
};

/// Every collection, held together so one write guard covers them all.
#[derive(Debug, Default)]
pub struct State {
    /// Treasury accounts by id.
    pub treasuries: HashMap<TreasuryId, Treasury>,
    /// Projects by id.
    pub projects: HashMap<ProjectId, Project>,
    /// Contractors by id.
    pub contractors: HashMap<ContractorId, Contractor>,
    /// Contract agreements by id.
    pub agreements: HashMap<AgreementId, ContractAgreement>,
    /// Contract payments by id.
    pub payments: HashMap<PaymentId, ContractPayment>,
    /// Ledger transactions by id.
    pub transactions: HashMap<TransactionId, Transaction>,
    /// Sales invoices by id.
    pub sales: HashMap<SaleId, Sale>,
    /// Sale returns by id.
    pub sale_returns: HashMap<SaleReturnId, SaleReturn>,
    /// Stock operations by id.
    pub stock_operations: HashMap<StockOperationId, StockOperation>,
    /// Employees by id.
    pub employees: HashMap<EmployeeId, Employee>,
    /// Payroll entries by id.
    pub salary_transactions: HashMap<SalaryTransactionId, SalaryTransaction>,
    /// Expense categories by id.
    pub categories: HashMap<CategoryId, Category>,
    /// Products by id.
    pub products: HashMap<ProductId, Product>,
    /// Warehouses by id.
    pub warehouses: HashMap<WarehouseId, Warehouse>,
}

impl State {
    /// Applies a delta set, resolving every target before mutating any.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` naming the first missing target; in that case no
    /// aggregate was touched.
    pub fn apply_deltas(&mut self, deltas: &DeltaSet) -> Result<(), DomainError> {
        for delta in deltas {
            self.resolve_target(delta.target)?;
        }
        for delta in deltas {
            self.apply_one(delta.target, delta.amount);
        }
        Ok(())
    }

    /// Applies a delta set, skipping targets that no longer exist.
    ///
    /// Used for reversals: deleting a transaction whose treasury was itself
    /// deleted must still remove the record, so missing targets are logged
    /// and skipped instead of failing the whole reversal.
    pub fn apply_deltas_lenient(&mut self, deltas: &DeltaSet) {
        for delta in deltas {
            if self.resolve_target(delta.target).is_ok() {
                self.apply_one(delta.target, delta.amount);
            } else {
                tracing::warn!(
                    target_field = ?delta.target,
                    amount = %delta.amount,
                    "reversal target missing, skipping delta"
                );
            }
        }
    }

    fn resolve_target(&self, target: DeltaTarget) -> Result<(), DomainError> {
        let found = match target {
            DeltaTarget::TreasuryBalance(id) => self.treasuries.contains_key(&id),
            DeltaTarget::ProjectRevenue(id)
            | DeltaTarget::ProjectExpenses(id)
            | DeltaTarget::ProjectAgreed(id)
            | DeltaTarget::ProjectPaid(id) => self.projects.contains_key(&id),
            DeltaTarget::ContractorBalance(id) => self.contractors.contains_key(&id),
            DeltaTarget::AgreementPaid(id) => self.agreements.contains_key(&id),
        };
        if found {
            Ok(())
        } else {
            Err(DomainError::NotFound {
                entity: Self::target_entity(target),
            })
        }
    }

    fn apply_one(&mut self, target: DeltaTarget, amount: rust_decimal::Decimal) {
        match target {
            DeltaTarget::TreasuryBalance(id) => {
                if let Some(treasury) = self.treasuries.get_mut(&id) {
                    treasury.current_balance += amount;
                }
            }
            DeltaTarget::ProjectRevenue(id) => {
                if let Some(project) = self.projects.get_mut(&id) {
                    project.total_revenue += amount;
                }
            }
            DeltaTarget::ProjectExpenses(id) => {
                if let Some(project) = self.projects.get_mut(&id) {
                    project.total_expenses += amount;
                }
            }
            DeltaTarget::ProjectAgreed(id) => {
                if let Some(project) = self.projects.get_mut(&id) {
                    project.total_agreed_contractor_amount += amount;
                }
            }
            DeltaTarget::ProjectPaid(id) => {
                if let Some(project) = self.projects.get_mut(&id) {
                    project.total_paid_contractor_amount += amount;
                }
            }
            DeltaTarget::ContractorBalance(id) => {
                if let Some(contractor) = self.contractors.get_mut(&id) {
                    contractor.balance += amount;
                }
            }
            DeltaTarget::AgreementPaid(id) => {
                if let Some(agreement) = self.agreements.get_mut(&id) {
                    agreement.paid_amount += amount;
                }
            }
        }
    }

    const fn target_entity(target: DeltaTarget) -> &'static str {
        match target {
            DeltaTarget::TreasuryBalance(_) => "treasury",
            DeltaTarget::ProjectRevenue(_)
            | DeltaTarget::ProjectExpenses(_)
            | DeltaTarget::ProjectAgreed(_)
            | DeltaTarget::ProjectPaid(_) => "project",
            DeltaTarget::ContractorBalance(_) => "contractor",
            DeltaTarget::AgreementPaid(_) => "contract agreement",
        }
    }

    /// All stock operations for one product, unordered.
    #[must_use]
    pub fn stock_history(&self, product: ProductId) -> Vec<StockOperation> {
        self.stock_operations
            .values()
            .filter(|op| op.product == product)
            .cloned()
            .collect()
    }

    /// All ledger transactions written on behalf of a sale.
    #[must_use]
    pub fn sale_twins(&self, sale: SaleId) -> Vec<Transaction> {
        self.transactions
            .values()
            .filter(|tx| tx.sale == Some(sale))
            .cloned()
            .collect()
    }

    /// An employee's payroll entries, unordered.
    #[must_use]
    pub fn payroll_entries(&self, employee: EmployeeId) -> Vec<SalaryTransaction> {
        self.salary_transactions
            .values()
            .filter(|entry| entry.employee == employee)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod state_tests {
    use super::*;
    use chrono::Utc;
    use mizan_core::treasury::{CreateTreasuryInput, TreasuryKind};
    use rust_decimal_macros::dec;

    fn state_with_treasury() -> (State, TreasuryId) {
        let mut state = State::default();
        let treasury = Treasury::create(
            CreateTreasuryInput {
                name: "Main Safe".into(),
                initial_balance: dec!(1000),
                kind: TreasuryKind::Cash,
                description: None,
                responsible_user: None,
                project: None,
            },
            Utc::now(),
        )
        .unwrap();
        let id = treasury.id;
        state.treasuries.insert(id, treasury);
        (state, id)
    }

    #[test]
    fn test_apply_deltas_is_all_or_nothing() {
        let (mut state, treasury) = state_with_treasury();

        let mut deltas = DeltaSet::new();
        deltas.credit(DeltaTarget::TreasuryBalance(treasury), dec!(500));
        deltas.credit(
            DeltaTarget::ProjectRevenue(ProjectId::new()), // not in the store
            dec!(500),
        );

        let err = state.apply_deltas(&deltas).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        // The treasury delta was not applied either.
        assert_eq!(state.treasuries[&treasury].current_balance, dec!(1000));
    }

    #[test]
    fn test_apply_deltas_lenient_skips_missing_targets() {
        let (mut state, treasury) = state_with_treasury();

        let mut deltas = DeltaSet::new();
        deltas.credit(DeltaTarget::TreasuryBalance(treasury), dec!(500));
        deltas.credit(DeltaTarget::ProjectRevenue(ProjectId::new()), dec!(500));

        state.apply_deltas_lenient(&deltas);
        assert_eq!(state.treasuries[&treasury].current_balance, dec!(1500));
    }
}
