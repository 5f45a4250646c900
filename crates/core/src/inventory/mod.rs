//! Stock operations and the on-hand quantity fold.
//!
//! Warehouse quantities are never stored; they are folded from the full
//! operation history ordered by business date. Creating, editing or deleting
//! an operation is only allowed when the re-folded history never dips below
//! zero at any point.

pub mod fold;
pub mod types;

#[cfg(test)]
mod fold_tests;
#[cfg(test)]
mod fold_props;

pub use fold::InventoryService;
pub use types::{
    CreateStockOperationInput, Product, StockOperation, StockOperationKind, Warehouse,
};
