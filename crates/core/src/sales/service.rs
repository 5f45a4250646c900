//! Sale planning: invoicing, collections, deletion and returns.

use chrono::{DateTime, Utc};
use mizan_shared::types::{SaleId, SaleReturnId, TransactionId, UserId};
use rust_decimal::Decimal;

use super::types::{
    CreateSaleInput, CreateSaleReturnInput, PaymentType, Sale, SaleItem, SaleReturn, SaleStatus,
};
use crate::error::DomainError;
use crate::inventory::{
    CreateStockOperationInput, InventoryService, StockOperation, StockOperationKind,
};
use crate::ledger::{LedgerService, Transaction, TransactionKind};
use crate::mutation::{DeltaSet, DeltaTarget};
use crate::treasury::Treasury;

/// A validated sale ready to commit.
#[derive(Debug, Clone)]
pub struct SalePlan {
    /// The invoice record to insert.
    pub sale: Sale,
    /// Deposit twin for the invoice total. Absent for quotes.
    pub twin: Option<Transaction>,
    /// Sale-type stock operations for stock-tracked lines.
    pub stock_ops: Vec<StockOperation>,
    /// Treasury credit for the full total. Empty for quotes.
    pub deltas: DeltaSet,
}

/// A validated balance collection on a credit sale.
#[derive(Debug, Clone)]
pub struct SalePaymentPlan {
    /// New collected total to write on the sale.
    pub paid_amount: Decimal,
    /// New outstanding balance.
    pub balance: Decimal,
    /// New status; flips to `Paid` when the balance reaches zero.
    pub status: SaleStatus,
    /// Deposit twin recording the collection.
    pub twin: Transaction,
    /// Treasury credit for the collected amount.
    pub deltas: DeltaSet,
}

/// A validated sale return ready to commit.
#[derive(Debug, Clone)]
pub struct SaleReturnPlan {
    /// The return record to insert.
    pub sale_return: SaleReturn,
    /// Return-type stock operations putting goods back.
    pub stock_ops: Vec<StockOperation>,
    /// The sale's lines after the returned quantities are deducted.
    pub updated_items: Vec<SaleItem>,
    /// The sale's total after the deduction.
    pub updated_total: Decimal,
    /// Withdrawal twin for the refund, when a treasury is given.
    pub twin: Option<Transaction>,
    /// Treasury debit for the refund. Empty without a treasury.
    pub deltas: DeltaSet,
}

/// Planning functions for the sales flow.
pub struct SalesService;

impl SalesService {
    /// Next invoice number: one past the highest existing number.
    ///
    /// Recomputed by scanning rather than kept as a counter, so deleting the
    /// latest invoice frees its number.
    pub fn next_invoice_number(existing: impl Iterator<Item = u64>) -> u64 {
        existing.max().unwrap_or(0) + 1
    }

    /// Validates a sale and derives its records, stock operations and
    /// treasury credit.
    ///
    /// Non-quote sales credit the treasury with the *full* total even on
    /// credit terms; the outstanding balance is tracked on the sale itself.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty or malformed lines, a missing treasury on a
    ///   non-quote sale, an out-of-range up-front amount, or a stock-tracked
    ///   line the warehouse cannot cover
    pub fn plan_create_sale(
        input: &CreateSaleInput,
        invoice_number: u64,
        treasury: Option<&Treasury>,
        stock_history: &[StockOperation],
        created_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<SalePlan, DomainError> {
        // 1. Lines.
        let items = Self::build_items(&input.items)?;
        let total: Decimal = items.iter().map(|item| item.total).sum();
        let date = input.date.unwrap_or(now);

        // 2. Quotes stop here: no treasury, no money, no stock.
        if input.quote {
            let sale = Sale {
                id: SaleId::new(),
                invoice_number,
                client: input.client,
                client_name: input.client_name.clone(),
                items,
                total,
                status: SaleStatus::Quote,
                treasury: None,
                payment_type: input.payment_type,
                payment_method: input.payment_method.clone(),
                paid_amount: Decimal::ZERO,
                balance: Decimal::ZERO,
                warehouse: None,
                created_by,
                date,
                created_at: now,
            };
            return Ok(SalePlan {
                sale,
                twin: None,
                stock_ops: Vec::new(),
                deltas: DeltaSet::new(),
            });
        }

        // 3. Money side.
        let treasury = treasury.ok_or_else(|| {
            DomainError::Validation("a sale requires a treasury".into())
        })?;
        let paid_amount = match input.payment_type {
            PaymentType::Cash => total,
            PaymentType::Credit => input.paid_amount.unwrap_or(Decimal::ZERO),
        };
        if paid_amount < Decimal::ZERO || paid_amount > total {
            return Err(DomainError::Validation(
                "paid amount must be between zero and the invoice total".into(),
            ));
        }
        let balance = total - paid_amount;
        let status = if balance == Decimal::ZERO {
            SaleStatus::Paid
        } else {
            SaleStatus::Unpaid
        };

        let sale = Sale {
            id: SaleId::new(),
            invoice_number,
            client: input.client,
            client_name: input.client_name.clone(),
            items,
            total,
            status,
            treasury: Some(treasury.id),
            payment_type: input.payment_type,
            payment_method: input.payment_method.clone(),
            paid_amount,
            balance,
            warehouse: input.warehouse,
            created_by,
            date,
            created_at: now,
        };

        let mut deltas = DeltaSet::new();
        deltas.credit(DeltaTarget::TreasuryBalance(treasury.id), total);
        let twin = Some(Self::sale_twin(
            &sale,
            TransactionKind::Deposit,
            treasury.id,
            total,
            format!("sale invoice #{invoice_number}"),
            created_by,
            date,
            now,
        ));

        // 4. Stock side: each line draws down the warehouse in sequence.
        let stock_ops = Self::sale_stock_ops(
            &sale,
            StockOperationKind::Sale,
            stock_history,
            created_by,
            date,
            now,
        )?;

        Ok(SalePlan {
            sale,
            twin,
            stock_ops,
            deltas,
        })
    }

    /// Validates collecting part of a credit sale's balance.
    ///
    /// # Errors
    ///
    /// - `Validation` when the sale is not an open credit sale or the
    ///   amount is not positive
    /// - `RemainingAmountExceeded` when the amount overpays the balance
    /// - `InsufficientBalance` when the treasury cannot cover the amount
    pub fn plan_pay_balance(
        sale: &Sale,
        treasury: &Treasury,
        amount: Decimal,
        recorded_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<SalePaymentPlan, DomainError> {
        if sale.payment_type != PaymentType::Credit || sale.balance <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "only credit sales with an outstanding balance can be collected".into(),
            ));
        }
        if amount <= Decimal::ZERO {
            return Err(DomainError::Validation(
                "collection amount must be positive".into(),
            ));
        }
        if amount > sale.balance {
            return Err(DomainError::RemainingAmountExceeded {
                remaining: sale.balance,
                requested: amount,
            });
        }
        treasury.ensure_can_debit(amount)?;

        let paid_amount = sale.paid_amount + amount;
        let balance = sale.total - paid_amount;
        let status = if balance == Decimal::ZERO {
            SaleStatus::Paid
        } else {
            SaleStatus::Unpaid
        };

        let mut deltas = DeltaSet::new();
        deltas.credit(DeltaTarget::TreasuryBalance(treasury.id), amount);
        let twin = Self::sale_twin(
            sale,
            TransactionKind::Deposit,
            treasury.id,
            amount,
            format!("collection for invoice #{}", sale.invoice_number),
            recorded_by,
            now,
            now,
        );

        Ok(SalePaymentPlan {
            paid_amount,
            balance,
            status,
            twin,
            deltas,
        })
    }

    /// Derives the deltas that undo a sale's twin transactions.
    ///
    /// Stock operations written by the sale are deliberately left in place;
    /// goods that left the warehouse are not conjured back by deleting the
    /// paperwork.
    #[must_use]
    pub fn plan_delete_sale(twins: &[Transaction]) -> DeltaSet {
        let mut deltas = DeltaSet::new();
        for twin in twins {
            deltas.extend(LedgerService::plan_delete(twin));
        }
        deltas
    }

    /// Validates a return and derives its records, stock operations and the
    /// refund debit.
    ///
    /// # Errors
    ///
    /// - `Validation` for empty or malformed lines, or a line returning more
    ///   than the sale still carries
    /// - `InsufficientBalance` when the refund treasury cannot cover it
    pub fn plan_create_return(
        input: &CreateSaleReturnInput,
        sale: &Sale,
        treasury: Option<&Treasury>,
        stock_history: &[StockOperation],
        created_by: Option<UserId>,
        now: DateTime<Utc>,
    ) -> Result<SaleReturnPlan, DomainError> {
        // 1. Lines.
        let returned: Vec<SaleItem> = Self::build_items(
            &input
                .items
                .iter()
                .map(|item| super::types::SaleItemInput {
                    product: item.product,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect::<Vec<_>>(),
        )?;
        let total: Decimal = returned.iter().map(|item| item.total).sum();
        let date = input.date.unwrap_or(now);

        // 2. Deduct from the sale's lines, rejecting over-returns.
        let mut updated_items = sale.items.clone();
        for line in &returned {
            let target = updated_items
                .iter_mut()
                .find(|item| match line.product {
                    Some(product) => item.product == Some(product),
                    None => item.product.is_none() && item.name == line.name,
                })
                .ok_or_else(|| {
                    DomainError::Validation(format!(
                        "returned line '{}' is not on the sale",
                        line.name
                    ))
                })?;
            if line.quantity > target.quantity {
                return Err(DomainError::Validation(format!(
                    "cannot return {} of '{}'; the sale carries {}",
                    line.quantity, line.name, target.quantity
                )));
            }
            target.quantity -= line.quantity;
            target.total = Decimal::from(target.quantity) * target.unit_price;
        }
        let updated_total: Decimal = updated_items.iter().map(|item| item.total).sum();

        // 3. Money side: refund out of the given treasury.
        let mut deltas = DeltaSet::new();
        let mut twin = None;
        let mut sale_return = SaleReturn {
            id: SaleReturnId::new(),
            sale: sale.id,
            items: returned,
            total,
            reason: input.reason.clone(),
            warehouse: input.warehouse,
            treasury: None,
            date,
            created_at: now,
        };
        if let Some(treasury) = treasury {
            treasury.ensure_can_debit(total)?;
            deltas.debit(DeltaTarget::TreasuryBalance(treasury.id), total);
            sale_return.treasury = Some(treasury.id);
            twin = Some(Self::sale_twin(
                sale,
                TransactionKind::Withdrawal,
                treasury.id,
                total,
                format!("refund for invoice #{}", sale.invoice_number),
                created_by,
                date,
                now,
            ));
        }

        // 4. Stock side: goods go back to the chosen warehouse.
        let return_shell = Sale {
            items: sale_return.items.clone(),
            warehouse: input.warehouse,
            ..sale.clone()
        };
        let stock_ops = Self::sale_stock_ops(
            &return_shell,
            StockOperationKind::Return,
            stock_history,
            created_by,
            date,
            now,
        )?;

        Ok(SaleReturnPlan {
            sale_return,
            stock_ops,
            updated_items,
            updated_total,
            twin,
            deltas,
        })
    }

    fn build_items(inputs: &[super::types::SaleItemInput]) -> Result<Vec<SaleItem>, DomainError> {
        if inputs.is_empty() {
            return Err(DomainError::Validation(
                "at least one line item is required".into(),
            ));
        }
        inputs
            .iter()
            .map(|input| {
                if input.quantity <= 0 {
                    return Err(DomainError::Validation(format!(
                        "line '{}' must have a positive quantity",
                        input.name
                    )));
                }
                if input.unit_price < Decimal::ZERO {
                    return Err(DomainError::Validation(format!(
                        "line '{}' must not have a negative unit price",
                        input.name
                    )));
                }
                Ok(SaleItem {
                    product: input.product,
                    name: input.name.clone(),
                    quantity: input.quantity,
                    unit_price: input.unit_price,
                    total: Decimal::from(input.quantity) * input.unit_price,
                })
            })
            .collect()
    }

    /// Emits one stock operation per stock-tracked line, threading each
    /// through the fold guard so a sale cannot oversell the warehouse.
    fn sale_stock_ops(
        sale: &Sale,
        kind: StockOperationKind,
        stock_history: &[StockOperation],
        created_by: Option<UserId>,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<StockOperation>, DomainError> {
        let Some(warehouse) = sale.warehouse else {
            return Ok(Vec::new());
        };

        let mut simulated = stock_history.to_vec();
        let mut ops = Vec::new();
        for item in sale.items.iter().filter(|item| item.product.is_some()) {
            let Some(product) = item.product else { continue };
            let op = StockOperation::create(
                CreateStockOperationInput {
                    product,
                    warehouse,
                    transfer_to: None,
                    kind,
                    quantity: item.quantity,
                    notes: Some(format!("invoice #{}", sale.invoice_number)),
                    date: Some(date),
                },
                created_by,
                now,
            )?;
            InventoryService::check_apply(&simulated, &op)?;
            simulated.push(op.clone());
            ops.push(op);
        }
        Ok(ops)
    }

    #[allow(clippy::too_many_arguments)]
    fn sale_twin(
        sale: &Sale,
        kind: TransactionKind,
        treasury: mizan_shared::types::TreasuryId,
        amount: Decimal,
        description: String,
        recorded_by: Option<UserId>,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            treasury,
            target_treasury: None,
            project: None,
            kind,
            amount,
            description: Some(description),
            category: None,
            vendor: None,
            payment_method: sale.payment_method.clone(),
            contract_payment: None,
            sale: Some(sale.id),
            recorded_by,
            date,
            created_at: now,
        }
    }
}
