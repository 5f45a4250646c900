//! Drift detection between stored derived values and the record history.
//!
//! Every derived field (treasury balance, project totals, contractor
//! balance, agreement paid amount, employee salary) can be recomputed from
//! the underlying records. `reconcile` does exactly that and reports every
//! field whose stored value disagrees, without fixing anything.

use rust_decimal::Decimal;

use mizan_core::ledger::TransactionKind;
use mizan_core::payroll::recompute_chain;

use crate::state::State;

/// One derived field whose stored value disagrees with its history.
#[derive(Debug, Clone, PartialEq)]
pub struct Drift {
    /// Which aggregate drifted ("treasury Main Safe", "employee Ahmed").
    pub entity: String,
    /// Which derived field.
    pub field: &'static str,
    /// The value currently stored.
    pub stored: Decimal,
    /// The value the record history folds to.
    pub expected: Decimal,
}

/// Recomputes every derived field from the records and reports mismatches.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn reconcile(state: &State) -> Vec<Drift> {
    let mut drifts = Vec::new();

    // Treasuries: initial balance plus the signed ledger fold.
    for treasury in state.treasuries.values() {
        let mut expected = treasury.initial_balance;
        for tx in state.transactions.values() {
            match tx.kind {
                TransactionKind::Deposit => {
                    if tx.treasury == treasury.id {
                        expected += tx.amount;
                    }
                }
                TransactionKind::Withdrawal | TransactionKind::ContractorPayment => {
                    if tx.treasury == treasury.id {
                        expected -= tx.amount;
                    }
                }
                TransactionKind::Transfer => {
                    if tx.treasury == treasury.id {
                        expected -= tx.amount;
                    }
                    if tx.target_treasury == Some(treasury.id) {
                        expected += tx.amount;
                    }
                }
            }
        }
        if expected != treasury.current_balance {
            drifts.push(Drift {
                entity: format!("treasury {}", treasury.name),
                field: "current_balance",
                stored: treasury.current_balance,
                expected,
            });
        }
    }

    // Projects: revenue/expenses from the ledger, agreed/paid from contracts.
    for project in state.projects.values() {
        let mut revenue = Decimal::ZERO;
        let mut expenses = Decimal::ZERO;
        for tx in state.transactions.values() {
            if tx.project != Some(project.id) {
                continue;
            }
            match tx.kind {
                TransactionKind::Deposit => revenue += tx.amount,
                TransactionKind::Withdrawal => expenses += tx.amount,
                TransactionKind::Transfer | TransactionKind::ContractorPayment => {}
            }
        }
        let agreed: Decimal = state
            .agreements
            .values()
            .filter(|a| a.project == project.id)
            .map(|a| a.agreed_amount)
            .sum();
        let paid: Decimal = state
            .payments
            .values()
            .filter(|p| p.project == project.id)
            .map(|p| p.amount)
            .sum();

        for (field, stored, expected) in [
            ("total_revenue", project.total_revenue, revenue),
            ("total_expenses", project.total_expenses, expenses),
            (
                "total_agreed_contractor_amount",
                project.total_agreed_contractor_amount,
                agreed,
            ),
            (
                "total_paid_contractor_amount",
                project.total_paid_contractor_amount,
                paid,
            ),
        ] {
            if stored != expected {
                drifts.push(Drift {
                    entity: format!("project {}", project.name),
                    field,
                    stored,
                    expected,
                });
            }
        }
    }

    // Contractors: agreed minus paid across their agreements.
    for contractor in state.contractors.values() {
        let agreed: Decimal = state
            .agreements
            .values()
            .filter(|a| a.contractor == contractor.id)
            .map(|a| a.agreed_amount)
            .sum();
        let paid: Decimal = state
            .payments
            .values()
            .filter(|p| p.contractor == contractor.id)
            .map(|p| p.amount)
            .sum();
        let expected = agreed - paid;
        if expected != contractor.balance {
            drifts.push(Drift {
                entity: format!("contractor {}", contractor.name),
                field: "balance",
                stored: contractor.balance,
                expected,
            });
        }
    }

    // Agreements: paid amount from their payments.
    for agreement in state.agreements.values() {
        let expected: Decimal = state
            .payments
            .values()
            .filter(|p| p.agreement == agreement.id)
            .map(|p| p.amount)
            .sum();
        if expected != agreement.paid_amount {
            drifts.push(Drift {
                entity: format!("agreement {}", agreement.id),
                field: "paid_amount",
                stored: agreement.paid_amount,
                expected,
            });
        }
    }

    // Employees: current salary from the relinked chain.
    for employee in state.employees.values() {
        let mut entries = state.payroll_entries(employee.id);
        let expected = recompute_chain(&mut entries, employee.base_salary);
        if expected != employee.salary {
            drifts.push(Drift {
                entity: format!("employee {}", employee.name),
                field: "salary",
                stored: employee.salary,
                expected,
            });
        }
    }

    drifts
}
