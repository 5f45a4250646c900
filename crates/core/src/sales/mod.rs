//! Sales invoices, partial payments and returns.
//!
//! Every money-moving step of the sales flow writes a twin ledger
//! transaction carrying the sale's id, so deleting an invoice can find and
//! reverse its ledger effects exactly.

pub mod service;
pub mod types;

#[cfg(test)]
mod service_tests;

pub use service::{SalePaymentPlan, SalePlan, SaleReturnPlan, SalesService};
pub use types::{
    CreateSaleInput, CreateSaleReturnInput, PaymentType, ReturnItemInput, Sale, SaleItem,
    SaleItemInput, SaleReturn, SaleStatus,
};
