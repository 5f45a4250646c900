//! The on-hand quantity fold and its edit/delete guard.

use mizan_shared::types::{ProductId, StockOperationId, WarehouseId};

use super::types::{StockOperation, StockOperationKind};
use crate::error::DomainError;

/// Pure inventory logic over a product's operation history.
pub struct InventoryService;

impl InventoryService {
    /// Signed effect of one operation on one warehouse's quantity.
    #[must_use]
    pub fn signed_effect(op: &StockOperation, warehouse: WarehouseId) -> i64 {
        match op.kind {
            StockOperationKind::Add | StockOperationKind::Return => {
                if op.warehouse == warehouse {
                    op.quantity
                } else {
                    0
                }
            }
            StockOperationKind::Issue | StockOperationKind::Sale => {
                if op.warehouse == warehouse {
                    -op.quantity
                } else {
                    0
                }
            }
            StockOperationKind::Transfer => {
                if op.warehouse == warehouse {
                    -op.quantity
                } else if op.transfer_to == Some(warehouse) {
                    op.quantity
                } else {
                    0
                }
            }
        }
    }

    /// Current on-hand quantity for a product in a warehouse.
    #[must_use]
    pub fn on_hand(ops: &[StockOperation], product: ProductId, warehouse: WarehouseId) -> i64 {
        ops.iter()
            .filter(|op| op.product == product)
            .map(|op| Self::signed_effect(op, warehouse))
            .sum()
    }

    /// Checks that appending `candidate` keeps every warehouse history
    /// non-negative at every point in time.
    ///
    /// # Errors
    ///
    /// Returns `Validation` naming the product when stock would go negative.
    pub fn check_apply(
        ops: &[StockOperation],
        candidate: &StockOperation,
    ) -> Result<(), DomainError> {
        let mut simulated: Vec<&StockOperation> = ops
            .iter()
            .filter(|op| op.product == candidate.product)
            .collect();
        simulated.push(candidate);
        Self::ensure_history_valid(&mut simulated, Self::touched_warehouses(candidate))
    }

    /// Checks that replacing the operation with `replacement.id` keeps every
    /// affected warehouse history non-negative.
    ///
    /// # Errors
    ///
    /// `NotFound` if no operation carries that id, `Validation` when the
    /// re-folded history would go negative.
    pub fn check_replace(
        ops: &[StockOperation],
        replacement: &StockOperation,
    ) -> Result<(), DomainError> {
        let original = ops
            .iter()
            .find(|op| op.id == replacement.id)
            .ok_or(DomainError::NotFound {
                entity: "stock operation",
            })?;

        let mut warehouses = Self::touched_warehouses(original);
        warehouses.extend(Self::touched_warehouses(replacement));

        let mut simulated: Vec<&StockOperation> = ops
            .iter()
            .filter(|op| op.product == replacement.product && op.id != replacement.id)
            .collect();
        simulated.push(replacement);
        Self::ensure_history_valid(&mut simulated, warehouses)
    }

    /// Checks that removing an operation keeps every affected warehouse
    /// history non-negative (an `Add` cannot be deleted once later
    /// operations consumed its quantity).
    ///
    /// # Errors
    ///
    /// `NotFound` if no operation carries that id, `Validation` when the
    /// re-folded history would go negative.
    pub fn check_delete(
        ops: &[StockOperation],
        op_id: StockOperationId,
    ) -> Result<(), DomainError> {
        let original = ops
            .iter()
            .find(|op| op.id == op_id)
            .ok_or(DomainError::NotFound {
                entity: "stock operation",
            })?;

        let warehouses = Self::touched_warehouses(original);
        let mut simulated: Vec<&StockOperation> = ops
            .iter()
            .filter(|op| op.product == original.product && op.id != op_id)
            .collect();
        Self::ensure_history_valid(&mut simulated, warehouses)
    }

    fn touched_warehouses(op: &StockOperation) -> Vec<WarehouseId> {
        let mut warehouses = vec![op.warehouse];
        if let Some(destination) = op.transfer_to {
            warehouses.push(destination);
        }
        warehouses
    }

    /// Folds the simulated history in business-date order and rejects it if
    /// any prefix goes negative for any of the given warehouses.
    fn ensure_history_valid(
        simulated: &mut [&StockOperation],
        warehouses: Vec<WarehouseId>,
    ) -> Result<(), DomainError> {
        simulated.sort_by_key(|op| (op.date, op.created_at, op.id.into_inner()));

        for warehouse in warehouses {
            let mut running = 0i64;
            for op in simulated.iter() {
                running += Self::signed_effect(op, warehouse);
                if running < 0 {
                    return Err(DomainError::Validation(
                        "insufficient stock: operation would drive warehouse quantity negative"
                            .into(),
                    ));
                }
            }
        }
        Ok(())
    }
}
