//! Sales repository.

use chrono::Utc;
use mizan_core::error::DomainError;
use mizan_core::inventory::StockOperation;
use mizan_core::sales::{
    CreateSaleInput, CreateSaleReturnInput, Sale, SaleReturn, SalesService,
};
use mizan_shared::types::{SaleId, TreasuryId, UserId};
use rust_decimal::Decimal;

use crate::store::MemoryStore;

/// Repository for invoices, collections and returns.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    store: MemoryStore,
}

impl SaleRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Records a sale: invoice, treasury credit, Deposit twin and stock
    /// draw-down in one commit.
    pub async fn create(
        &self,
        input: CreateSaleInput,
        created_by: Option<UserId>,
    ) -> Result<Sale, DomainError> {
        let mut state = self.store.write().await;

        let treasury = match (input.quote, input.treasury) {
            (true, _) | (false, None) => None,
            (false, Some(id)) => Some(
                state
                    .treasuries
                    .get(&id)
                    .cloned()
                    .ok_or(DomainError::NotFound { entity: "treasury" })?,
            ),
        };
        if let Some(warehouse) = input.warehouse {
            if !state.warehouses.contains_key(&warehouse) {
                return Err(DomainError::NotFound {
                    entity: "warehouse",
                });
            }
        }
        for item in &input.items {
            if let Some(product) = item.product {
                if !state.products.contains_key(&product) {
                    return Err(DomainError::NotFound { entity: "product" });
                }
            }
        }

        let invoice_number = SalesService::next_invoice_number(
            state.sales.values().map(|sale| sale.invoice_number),
        );
        let history: Vec<StockOperation> = state.stock_operations.values().cloned().collect();

        let plan = SalesService::plan_create_sale(
            &input,
            invoice_number,
            treasury.as_ref(),
            &history,
            created_by,
            Utc::now(),
        )?;
        state.apply_deltas(&plan.deltas)?;
        state.sales.insert(plan.sale.id, plan.sale.clone());
        if let Some(twin) = plan.twin {
            state.transactions.insert(twin.id, twin);
        }
        for op in plan.stock_ops {
            state.stock_operations.insert(op.id, op);
        }

        tracing::info!(
            sale_id = %plan.sale.id,
            invoice_number = plan.sale.invoice_number,
            total = %plan.sale.total,
            status = ?plan.sale.status,
            "sale recorded"
        );
        Ok(plan.sale)
    }

    /// Collects part of a credit sale's outstanding balance.
    ///
    /// The money lands in the given treasury (defaulting to the sale's own)
    /// and a Deposit twin carrying the sale's id is written.
    pub async fn pay_balance(
        &self,
        id: SaleId,
        amount: Decimal,
        treasury: Option<TreasuryId>,
        recorded_by: Option<UserId>,
    ) -> Result<Sale, DomainError> {
        let mut state = self.store.write().await;

        let sale = state
            .sales
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "sale" })?;
        let treasury_id = treasury
            .or(sale.treasury)
            .ok_or(DomainError::NotFound { entity: "treasury" })?;
        let treasury = state
            .treasuries
            .get(&treasury_id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "treasury" })?;

        let plan = SalesService::plan_pay_balance(&sale, &treasury, amount, recorded_by, Utc::now())?;
        state.apply_deltas(&plan.deltas)?;
        state.transactions.insert(plan.twin.id, plan.twin);
        let sale = state
            .sales
            .get_mut(&id)
            .ok_or(DomainError::NotFound { entity: "sale" })?;
        sale.paid_amount = plan.paid_amount;
        sale.balance = plan.balance;
        sale.status = plan.status;

        tracing::info!(sale_id = %id, amount = %amount, balance = %plan.balance, "sale balance collected");
        Ok(sale.clone())
    }

    /// Deletes a sale, reversing every twin transaction written on its
    /// behalf. Stock operations are left in place: deleting the paperwork
    /// does not put goods back on the shelf.
    pub async fn delete(&self, id: SaleId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        if !state.sales.contains_key(&id) {
            return Err(DomainError::NotFound { entity: "sale" });
        }

        let twins = state.sale_twins(id);
        let reversal = SalesService::plan_delete_sale(&twins);
        state.apply_deltas_lenient(&reversal);
        for twin in &twins {
            state.transactions.remove(&twin.id);
        }
        state.sales.remove(&id);
        let returns: Vec<_> = state
            .sale_returns
            .values()
            .filter(|ret| ret.sale == id)
            .map(|ret| ret.id)
            .collect();
        for return_id in returns {
            state.sale_returns.remove(&return_id);
        }

        tracing::info!(sale_id = %id, twins = twins.len(), "sale deleted and reversed");
        Ok(())
    }

    /// Records a return: goods go back to the warehouse, the refund leaves
    /// the treasury with a Withdrawal twin, and the sale's lines shrink.
    pub async fn create_return(
        &self,
        input: CreateSaleReturnInput,
        created_by: Option<UserId>,
    ) -> Result<SaleReturn, DomainError> {
        let mut state = self.store.write().await;

        let sale = state
            .sales
            .get(&input.sale)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "sale" })?;
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
        if let Some(warehouse) = input.warehouse {
            if !state.warehouses.contains_key(&warehouse) {
                return Err(DomainError::NotFound {
                    entity: "warehouse",
                });
            }
        }

        let history: Vec<StockOperation> = state.stock_operations.values().cloned().collect();
        let plan = SalesService::plan_create_return(
            &input,
            &sale,
            treasury.as_ref(),
            &history,
            created_by,
            Utc::now(),
        )?;

        state.apply_deltas(&plan.deltas)?;
        state
            .sale_returns
            .insert(plan.sale_return.id, plan.sale_return.clone());
        if let Some(twin) = plan.twin {
            state.transactions.insert(twin.id, twin);
        }
        for op in plan.stock_ops {
            state.stock_operations.insert(op.id, op);
        }
        let sale = state
            .sales
            .get_mut(&input.sale)
            .ok_or(DomainError::NotFound { entity: "sale" })?;
        sale.items = plan.updated_items;
        sale.total = plan.updated_total;

        tracing::info!(
            sale_id = %input.sale,
            return_id = %plan.sale_return.id,
            total = %plan.sale_return.total,
            "sale return recorded"
        );
        Ok(plan.sale_return)
    }

    /// Fetches one sale.
    pub async fn get(&self, id: SaleId) -> Result<Sale, DomainError> {
        let state = self.store.read().await;
        state
            .sales
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound { entity: "sale" })
    }

    /// Lists sales, newest first.
    pub async fn list(&self) -> Vec<Sale> {
        let state = self.store.read().await;
        let mut sales: Vec<Sale> = state.sales.values().cloned().collect();
        sales.sort_by(|a, b| b.invoice_number.cmp(&a.invoice_number));
        sales
    }

    /// Lists returns, optionally for one sale.
    pub async fn list_returns(&self, sale: Option<SaleId>) -> Vec<SaleReturn> {
        let state = self.store.read().await;
        let mut returns: Vec<SaleReturn> = state
            .sale_returns
            .values()
            .filter(|ret| sale.is_none_or(|id| ret.sale == id))
            .cloned()
            .collect();
        returns.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        returns
    }
}
