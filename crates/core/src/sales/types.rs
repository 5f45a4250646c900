//! Sales domain types.

use chrono::{DateTime, Utc};
use mizan_shared::types::{
    ClientId, ProductId, SaleId, SaleReturnId, TreasuryId, UserId, WarehouseId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Settlement status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Fully collected.
    Paid,
    /// Credit sale with an outstanding balance.
    Unpaid,
    /// A price quote; moves no money and no stock.
    Quote,
}

/// How the customer pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Paid in full at sale time.
    Cash,
    /// Partially paid; the rest is collected later.
    Credit,
}

/// One invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    /// Inventory product, when the line is stock-tracked.
    pub product: Option<ProductId>,
    /// Display name of the goods sold.
    pub name: String,
    /// Units sold.
    pub quantity: i64,
    /// Price per unit.
    pub unit_price: Decimal,
    /// Line total: `quantity * unit_price`.
    pub total: Decimal,
}

/// A sales invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    /// Unique identifier.
    pub id: SaleId,
    /// Monotonically increasing invoice number.
    pub invoice_number: u64,
    /// Registered client, if any.
    pub client: Option<ClientId>,
    /// Free-form customer name for walk-in sales.
    pub client_name: Option<String>,
    /// Invoice lines.
    pub items: Vec<SaleItem>,
    /// Sum of line totals.
    pub total: Decimal,
    /// Paid, unpaid or quote.
    pub status: SaleStatus,
    /// Treasury the money goes to. Absent for quotes.
    pub treasury: Option<TreasuryId>,
    /// Cash or credit.
    pub payment_type: PaymentType,
    /// Payment method label.
    pub payment_method: Option<String>,
    /// Collected so far.
    pub paid_amount: Decimal,
    /// Outstanding: `total - paid_amount`.
    pub balance: Decimal,
    /// Warehouse stock is drawn from, when lines are stock-tracked.
    pub warehouse: Option<WarehouseId>,
    /// User who recorded the sale.
    pub created_by: Option<UserId>,
    /// Business date of the sale.
    pub date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A return against a sale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReturn {
    /// Unique identifier.
    pub id: SaleReturnId,
    /// Sale being returned against.
    pub sale: SaleId,
    /// Returned lines.
    pub items: Vec<SaleItem>,
    /// Sum of returned line totals.
    pub total: Decimal,
    /// Why the goods came back.
    pub reason: Option<String>,
    /// Warehouse the goods return to.
    pub warehouse: Option<WarehouseId>,
    /// Treasury the refund left, if money was refunded.
    pub treasury: Option<TreasuryId>,
    /// Business date of the return.
    pub date: DateTime<Utc>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One requested invoice line.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleItemInput {
    /// Inventory product, when stock-tracked.
    pub product: Option<ProductId>,
    /// Display name of the goods.
    pub name: String,
    /// Units sold. Must be positive.
    pub quantity: i64,
    /// Price per unit. Must not be negative.
    pub unit_price: Decimal,
}

/// Input for creating a sale.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSaleInput {
    /// Registered client.
    pub client: Option<ClientId>,
    /// Free-form customer name.
    pub client_name: Option<String>,
    /// Invoice lines. Must not be empty.
    pub items: Vec<SaleItemInput>,
    /// True for a price quote.
    #[serde(default)]
    pub quote: bool,
    /// Cash or credit.
    pub payment_type: PaymentType,
    /// Payment method label.
    pub payment_method: Option<String>,
    /// Treasury the money goes to. Required unless `quote`.
    pub treasury: Option<TreasuryId>,
    /// Collected up front on a credit sale. Ignored for cash sales.
    pub paid_amount: Option<Decimal>,
    /// Warehouse stock is drawn from.
    pub warehouse: Option<WarehouseId>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

/// One returned line.
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnItemInput {
    /// Product being returned.
    pub product: Option<ProductId>,
    /// Display name of the goods.
    pub name: String,
    /// Units returned. Must be positive.
    pub quantity: i64,
    /// Price per unit refunded.
    pub unit_price: Decimal,
}

/// Input for creating a sale return.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSaleReturnInput {
    /// Sale being returned against.
    pub sale: SaleId,
    /// Returned lines. Must not be empty.
    pub items: Vec<ReturnItemInput>,
    /// Why the goods came back.
    pub reason: Option<String>,
    /// Warehouse the goods return to.
    pub warehouse: Option<WarehouseId>,
    /// Treasury to refund out of.
    pub treasury: Option<TreasuryId>,
    /// Business date. Defaults to now.
    pub date: Option<DateTime<Utc>>,
}
