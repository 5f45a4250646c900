//! Inventory domain types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{ProductId, StockOperationId, UserId, WarehouseId};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Kind of stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockOperationKind {
    /// Goods received into a warehouse.
    Add,
    /// Goods issued out for consumption.
    Issue,
    /// Goods moved from one warehouse to another.
    Transfer,
    /// Goods sold; written by sale creation.
    Sale,
    /// Goods returned by a customer; written by sale returns.
    Return,
}

/// One movement of a product's quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockOperation {
    /// Unique identifier.
    pub id: StockOperationId,
    /// Product being moved.
    pub product: ProductId,
    /// Warehouse the movement applies to (source for transfers).
    pub warehouse: WarehouseId,
    /// Destination warehouse, for transfers only.
    pub transfer_to: Option<WarehouseId>,
    /// Kind of movement.
    pub kind: StockOperationKind,
    /// Quantity moved. Always positive; the kind carries the sign.
    pub quantity: i64,
    /// Free-form note.
    pub notes: Option<String>,
    /// User who recorded the movement.
    pub created_by: Option<UserId>,
    /// Business date; primary ordering key for the fold.
    pub date: DateTime<Utc>,
    /// Creation timestamp; tiebreaker for same-date ordering.
    pub created_at: DateTime<Utc>,
}

/// Input for recording a stock movement.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateStockOperationInput {
    /// Product being moved.
    pub product: ProductId,
    /// Warehouse the movement applies to.
    pub warehouse: WarehouseId,
    /// Destination warehouse, for transfers.
    pub transfer_to: Option<WarehouseId>,
    /// Kind of movement.
    pub kind: StockOperationKind,
    /// Quantity to move. Must be positive.
    pub quantity: i64,
    /// Free-form note.
    pub notes: Option<String>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

impl StockOperation {
    /// Builds an operation record from validated input.
    ///
    /// # Errors
    ///
    /// - `Validation` for non-positive quantities or a transfer without a
    ///   destination
    /// - `InvalidReference` for a transfer onto the same warehouse
    pub fn create(
        input: CreateStockOperationInput,
        created_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if input.quantity <= 0 {
            return Err(DomainError::Validation(
                "stock quantity must be positive".into(),
            ));
        }
        match input.kind {
            StockOperationKind::Transfer => {
                let destination = input.transfer_to.ok_or_else(|| {
                    DomainError::Validation(
                        "transfer requires a destination warehouse".into(),
                    )
                })?;
                if destination == input.warehouse {
                    return Err(DomainError::InvalidReference(
                        "cannot transfer a warehouse to itself".into(),
                    ));
                }
            }
            _ if input.transfer_to.is_some() => {
                return Err(DomainError::Validation(
                    "only transfers may name a destination warehouse".into(),
                ));
            }
            _ => {}
        }

        Ok(Self {
            id: StockOperationId::new(),
            product: input.product,
            warehouse: input.warehouse,
            transfer_to: input.transfer_to,
            kind: input.kind,
            quantity: input.quantity,
            notes: input.notes,
            created_by,
            date: input.date.unwrap_or(now),
            created_at: now,
        })
    }
}

/// A product tracked in inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier.
    pub id: ProductId,
    /// Unique display name.
    pub name: String,
    /// Unit of measure ("bag", "ton", "piece", ...).
    pub unit: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A physical storage location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Unique identifier.
    pub id: WarehouseId,
    /// Unique display name.
    pub name: String,
    /// Street address or site label.
    pub location: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
