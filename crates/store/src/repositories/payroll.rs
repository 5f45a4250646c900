//! Payroll repository.

use chrono::Utc;
use mizan_core::error::DomainError;
use mizan_core::ledger::Category;
use mizan_core::payroll::{
    recompute_chain, CreateSalaryTransactionInput, PayrollService, SalaryTransaction,
    SalaryTransactionKind, SalaryTransactionUpdate,
};
use mizan_shared::types::{CategoryId, EmployeeId, SalaryTransactionId, UserId};

use crate::state::State;
use crate::store::MemoryStore;

/// Name of the expense category salary disbursements are filed under.
const SALARY_CATEGORY: &str = "Employee Salaries";

/// Repository for salary entries.
#[derive(Debug, Clone)]
pub struct PayrollRepository {
    store: MemoryStore,
}

impl PayrollRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Records a salary entry and relinks the employee's chain.
    ///
    /// A `Salary` entry with a treasury also disburses the absolute amount
    /// out of it, writing a Withdrawal twin under the salaries category
    /// (created on first use).
    pub async fn create(
        &self,
        input: CreateSalaryTransactionInput,
        recorded_by: Option<UserId>,
    ) -> Result<SalaryTransaction, DomainError> {
        let mut state = self.store.write().await;

        let employee = state
            .employees
            .get(&input.employee)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "employee" })?;
        let treasury = match input.treasury {
            Some(id) => Some(
                state
                    .treasuries
                    .get(&id)
                    .cloned()
                    .ok_or(DomainError::NotFound { entity: "treasury" })?,
            ),
            None => None,
        };
        let will_disburse =
            input.kind == SalaryTransactionKind::Salary && treasury.is_some();
        let category = if will_disburse {
            Some(Self::salary_category(&mut state))
        } else {
            None
        };

        let plan = PayrollService::plan_create(
            &input,
            &employee,
            treasury.as_ref(),
            category,
            recorded_by,
            Utc::now(),
        )?;
        state.apply_deltas(&plan.deltas)?;
        state
            .salary_transactions
            .insert(plan.entry.id, plan.entry.clone());
        if let Some(twin) = plan.twin {
            state.transactions.insert(twin.id, twin);
        }

        let entry_id = plan.entry.id;
        Self::relink(&mut state, employee.id);
        let entry = state
            .salary_transactions
            .get(&entry_id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "salary transaction",
            })?;

        tracing::info!(
            entry_id = %entry.id,
            employee_id = %employee.id,
            kind = ?entry.kind,
            amount = %entry.amount,
            "salary entry recorded"
        );
        Ok(entry)
    }

    /// Edits a salary entry and relinks everything after it.
    pub async fn update(
        &self,
        id: SalaryTransactionId,
        update: SalaryTransactionUpdate,
    ) -> Result<SalaryTransaction, DomainError> {
        let mut state = self.store.write().await;

        let employee_id = {
            let entry = state
                .salary_transactions
                .get_mut(&id)
                .ok_or(DomainError::NotFound {
                    entity: "salary transaction",
                })?;
            PayrollService::apply_update(entry, update);
            entry.employee
        };

        Self::relink(&mut state, employee_id);
        state
            .salary_transactions
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "salary transaction",
            })
    }

    /// Deletes a salary entry and relinks the remaining chain.
    ///
    /// The disbursement twin, if any, is a plain ledger withdrawal and is
    /// reversed through the transaction API, not here.
    pub async fn delete(&self, id: SalaryTransactionId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        let entry = state
            .salary_transactions
            .remove(&id)
            .ok_or(DomainError::NotFound {
                entity: "salary transaction",
            })?;

        Self::relink(&mut state, entry.employee);
        tracing::info!(entry_id = %id, employee_id = %entry.employee, "salary entry deleted");
        Ok(())
    }

    /// An employee's chain, oldest first.
    pub async fn list(&self, employee: EmployeeId) -> Result<Vec<SalaryTransaction>, DomainError> {
        let state = self.store.read().await;
        if !state.employees.contains_key(&employee) {
            return Err(DomainError::NotFound { entity: "employee" });
        }
        let mut entries = state.payroll_entries(employee);
        entries.sort_by_key(|entry| (entry.date, entry.created_at, entry.id.into_inner()));
        Ok(entries)
    }

    /// Sorts and relinks the employee's whole chain, then writes back every
    /// entry and the employee's current salary.
    fn relink(state: &mut State, employee_id: EmployeeId) {
        let Some(employee) = state.employees.get(&employee_id).cloned() else {
            return;
        };
        let mut entries = state.payroll_entries(employee_id);
        let salary = recompute_chain(&mut entries, employee.base_salary);
        for entry in entries {
            state.salary_transactions.insert(entry.id, entry);
        }
        if let Some(employee) = state.employees.get_mut(&employee_id) {
            employee.salary = salary;
        }
    }

    /// Finds or creates the salaries expense category.
    fn salary_category(state: &mut State) -> CategoryId {
        if let Some(category) = state
            .categories
            .values()
            .find(|category| category.name == SALARY_CATEGORY)
        {
            return category.id;
        }
        let category = Category {
            id: CategoryId::new(),
            name: SALARY_CATEGORY.to_owned(),
            description: Some("Auto-created for salary disbursements".into()),
            created_at: Utc::now(),
        };
        let id = category.id;
        state.categories.insert(id, category);
        id
    }
}
