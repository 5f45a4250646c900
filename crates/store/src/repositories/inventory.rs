//! Stock operation repository.

use chrono::{DateTime, Utc};
use mizan_core::error::DomainError;
use mizan_core::inventory::{
    CreateStockOperationInput, InventoryService, StockOperation,
};
use mizan_shared::types::{ProductId, StockOperationId, UserId, WarehouseId};
use serde::Deserialize;

use crate::store::MemoryStore;

/// Fields a stock operation edit may change. Any of them can invalidate
/// the fold, so all go through the re-fold guard.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateStockOperationInput {
    /// New quantity.
    pub quantity: Option<i64>,
    /// New business date; repositions the operation within the fold.
    pub date: Option<DateTime<Utc>>,
    /// New note.
    pub notes: Option<String>,
}

/// A product's folded on-hand quantity in one warehouse.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StockLevel {
    /// The product.
    pub product: ProductId,
    /// Folded on-hand quantity.
    pub on_hand: i64,
}

/// Repository for stock operations.
#[derive(Debug, Clone)]
pub struct StockRepository {
    store: MemoryStore,
}

impl StockRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub const fn new(store: MemoryStore) -> Self {
        Self { store }
    }

    /// Records a stock movement after threading it through the fold guard.
    pub async fn create(
        &self,
        input: CreateStockOperationInput,
        created_by: Option<UserId>,
    ) -> Result<StockOperation, DomainError> {
        let mut state = self.store.write().await;

        if !state.products.contains_key(&input.product) {
            return Err(DomainError::NotFound { entity: "product" });
        }
        if !state.warehouses.contains_key(&input.warehouse) {
            return Err(DomainError::NotFound {
                entity: "warehouse",
            });
        }
        if let Some(destination) = input.transfer_to {
            if !state.warehouses.contains_key(&destination) {
                return Err(DomainError::NotFound {
                    entity: "warehouse",
                });
            }
        }

        let op = StockOperation::create(input, created_by, Utc::now())?;
        let history = state.stock_history(op.product);
        InventoryService::check_apply(&history, &op)?;
        state.stock_operations.insert(op.id, op.clone());

        tracing::info!(
            operation_id = %op.id,
            kind = ?op.kind,
            quantity = op.quantity,
            "stock operation recorded"
        );
        Ok(op)
    }

    /// Edits an operation, re-folding the product's history to make sure no
    /// point in time goes negative with the new values.
    pub async fn update(
        &self,
        id: StockOperationId,
        input: UpdateStockOperationInput,
    ) -> Result<StockOperation, DomainError> {
        let mut state = self.store.write().await;
        let mut replacement = state
            .stock_operations
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "stock operation",
            })?;

        if let Some(quantity) = input.quantity {
            if quantity <= 0 {
                return Err(DomainError::Validation(
                    "stock quantity must be positive".into(),
                ));
            }
            replacement.quantity = quantity;
        }
        if let Some(date) = input.date {
            replacement.date = date;
        }
        if let Some(notes) = input.notes {
            replacement.notes = Some(notes);
        }

        let history = state.stock_history(replacement.product);
        InventoryService::check_replace(&history, &replacement)?;
        state.stock_operations.insert(id, replacement.clone());
        Ok(replacement)
    }

    /// Deletes an operation if the remaining history still never dips below
    /// zero.
    pub async fn delete(&self, id: StockOperationId) -> Result<(), DomainError> {
        let mut state = self.store.write().await;
        let op = state
            .stock_operations
            .get(&id)
            .cloned()
            .ok_or(DomainError::NotFound {
                entity: "stock operation",
            })?;

        let history = state.stock_history(op.product);
        InventoryService::check_delete(&history, id)?;
        state.stock_operations.remove(&id);
        tracing::info!(operation_id = %id, "stock operation deleted");
        Ok(())
    }

    /// Folded on-hand quantity for one product in one warehouse.
    pub async fn on_hand(&self, product: ProductId, warehouse: WarehouseId) -> i64 {
        let state = self.store.read().await;
        InventoryService::on_hand(&state.stock_history(product), product, warehouse)
    }

    /// Folded quantities for every product in a warehouse.
    pub async fn warehouse_levels(&self, warehouse: WarehouseId) -> Vec<StockLevel> {
        let state = self.store.read().await;
        let mut levels: Vec<StockLevel> = state
            .products
            .keys()
            .map(|&product| StockLevel {
                product,
                on_hand: InventoryService::on_hand(
                    &state.stock_history(product),
                    product,
                    warehouse,
                ),
            })
            .filter(|level| level.on_hand != 0)
            .collect();
        levels.sort_by_key(|level| level.product.into_inner());
        levels
    }

    /// Lists operations, optionally filtered, newest first.
    pub async fn list(
        &self,
        product: Option<ProductId>,
        warehouse: Option<WarehouseId>,
    ) -> Vec<StockOperation> {
        let state = self.store.read().await;
        let mut ops: Vec<StockOperation> = state
            .stock_operations
            .values()
            .filter(|op| product.is_none_or(|id| op.product == id))
            .filter(|op| {
                warehouse.is_none_or(|id| op.warehouse == id || op.transfer_to == Some(id))
            })
            .cloned()
            .collect();
        ops.sort_by(|a, b| (b.date, b.created_at).cmp(&(a.date, a.created_at)));
        ops
    }
}
