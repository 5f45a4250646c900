use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::inventory::{
    CreateStockOperationInput, InventoryService, StockOperation, StockOperationKind,
};
use crate::mutation::DeltaTarget;
use crate::treasury::{CreateTreasuryInput, Treasury, TreasuryKind};
use mizan_shared::types::{ProductId, WarehouseId};

fn treasury(balance: Decimal) -> Treasury {
    Treasury::create(
        CreateTreasuryInput {
            name: "Main Safe".into(),
            initial_balance: balance,
            kind: TreasuryKind::Cash,
            description: None,
            responsible_user: None,
            project: None,
        },
        Utc::now(),
    )
    .unwrap()
}

fn stocked(product: ProductId, warehouse: WarehouseId, quantity: i64) -> Vec<StockOperation> {
    vec![StockOperation::create(
        CreateStockOperationInput {
            product,
            warehouse,
            transfer_to: None,
            kind: StockOperationKind::Add,
            quantity,
            notes: None,
            date: Some(Utc::now() - Duration::days(30)),
        },
        None,
        Utc::now(),
    )
    .unwrap()]
}

fn line(product: Option<ProductId>, quantity: i64, unit_price: Decimal) -> SaleItemInput {
    SaleItemInput {
        product,
        name: "cement bag".into(),
        quantity,
        unit_price,
    }
}

fn sale_input(items: Vec<SaleItemInput>, payment_type: PaymentType) -> CreateSaleInput {
    CreateSaleInput {
        client: None,
        client_name: Some("Walk-in".into()),
        items,
        quote: false,
        payment_type,
        payment_method: None,
        treasury: None,
        paid_amount: None,
        warehouse: None,
        date: None,
    }
}

#[test]
fn test_next_invoice_number_scans_for_max() {
    assert_eq!(SalesService::next_invoice_number([].into_iter()), 1);
    assert_eq!(
        SalesService::next_invoice_number([3u64, 17, 9].into_iter()),
        18
    );
}

#[test]
fn test_cash_sale_is_fully_paid_and_credits_treasury() {
    let treasury = treasury(dec!(0));
    let input = sale_input(vec![line(None, 4, dec!(250))], PaymentType::Cash);

    let plan =
        SalesService::plan_create_sale(&input, 1, Some(&treasury), &[], None, Utc::now()).unwrap();

    assert_eq!(plan.sale.total, dec!(1000));
    assert_eq!(plan.sale.paid_amount, dec!(1000));
    assert_eq!(plan.sale.balance, Decimal::ZERO);
    assert_eq!(plan.sale.status, SaleStatus::Paid);
    assert_eq!(
        plan.deltas.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(1000)
    );
    let twin = plan.twin.unwrap();
    assert_eq!(twin.sale, Some(plan.sale.id));
    assert_eq!(twin.amount, dec!(1000));
}

#[test]
fn test_credit_sale_credits_full_total_but_tracks_balance() {
    let treasury = treasury(dec!(0));
    let mut input = sale_input(vec![line(None, 10, dec!(100))], PaymentType::Credit);
    input.paid_amount = Some(dec!(300));

    let plan =
        SalesService::plan_create_sale(&input, 7, Some(&treasury), &[], None, Utc::now()).unwrap();

    assert_eq!(plan.sale.paid_amount, dec!(300));
    assert_eq!(plan.sale.balance, dec!(700));
    assert_eq!(plan.sale.status, SaleStatus::Unpaid);
    // The treasury is credited the full total up front.
    assert_eq!(
        plan.deltas.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(1000)
    );
}

#[test]
fn test_quote_moves_nothing() {
    let mut input = sale_input(vec![line(None, 2, dec!(50))], PaymentType::Cash);
    input.quote = true;

    let plan = SalesService::plan_create_sale(&input, 2, None, &[], None, Utc::now()).unwrap();
    assert_eq!(plan.sale.status, SaleStatus::Quote);
    assert!(plan.twin.is_none());
    assert!(plan.deltas.is_empty());
    assert!(plan.stock_ops.is_empty());
}

#[test]
fn test_non_quote_sale_requires_treasury() {
    let input = sale_input(vec![line(None, 1, dec!(10))], PaymentType::Cash);
    let err = SalesService::plan_create_sale(&input, 1, None, &[], None, Utc::now()).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_sale_emits_stock_operations_and_guards_overselling() {
    let treasury = treasury(dec!(0));
    let product = ProductId::new();
    let warehouse = WarehouseId::new();
    let history = stocked(product, warehouse, 10);

    let mut input = sale_input(vec![line(Some(product), 6, dec!(75))], PaymentType::Cash);
    input.warehouse = Some(warehouse);

    let plan = SalesService::plan_create_sale(
        &input,
        1,
        Some(&treasury),
        &history,
        None,
        Utc::now(),
    )
    .unwrap();
    assert_eq!(plan.stock_ops.len(), 1);
    assert_eq!(plan.stock_ops[0].kind, StockOperationKind::Sale);
    assert_eq!(plan.stock_ops[0].quantity, 6);

    // Selling more than the warehouse holds is rejected.
    let mut oversell = sale_input(vec![line(Some(product), 11, dec!(75))], PaymentType::Cash);
    oversell.warehouse = Some(warehouse);
    let err = SalesService::plan_create_sale(
        &oversell,
        2,
        Some(&treasury),
        &history,
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_pay_balance_collects_and_flips_status() {
    let treasury = treasury(dec!(500));
    let mut input = sale_input(vec![line(None, 10, dec!(100))], PaymentType::Credit);
    input.paid_amount = Some(dec!(300));
    let sale = SalesService::plan_create_sale(&input, 1, Some(&treasury), &[], None, Utc::now())
        .unwrap()
        .sale;

    let partial =
        SalesService::plan_pay_balance(&sale, &treasury, dec!(200), None, Utc::now()).unwrap();
    assert_eq!(partial.paid_amount, dec!(500));
    assert_eq!(partial.balance, dec!(500));
    assert_eq!(partial.status, SaleStatus::Unpaid);
    assert_eq!(
        partial.deltas.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(200)
    );
    assert_eq!(partial.twin.sale, Some(sale.id));

    let full =
        SalesService::plan_pay_balance(&sale, &treasury, dec!(700), None, Utc::now()).unwrap();
    assert_eq!(full.balance, Decimal::ZERO);
    assert_eq!(full.status, SaleStatus::Paid);
}

#[test]
fn test_pay_balance_rejects_overpay_and_cash_sales() {
    let treasury = treasury(dec!(5000));
    let mut input = sale_input(vec![line(None, 10, dec!(100))], PaymentType::Credit);
    input.paid_amount = Some(dec!(300));
    let sale = SalesService::plan_create_sale(&input, 1, Some(&treasury), &[], None, Utc::now())
        .unwrap()
        .sale;

    let err = SalesService::plan_pay_balance(&sale, &treasury, dec!(701), None, Utc::now())
        .unwrap_err();
    assert_eq!(err.error_code(), "REMAINING_AMOUNT_EXCEEDED");

    let cash = sale_input(vec![line(None, 1, dec!(100))], PaymentType::Cash);
    let cash_sale =
        SalesService::plan_create_sale(&cash, 2, Some(&treasury), &[], None, Utc::now())
            .unwrap()
            .sale;
    let err = SalesService::plan_pay_balance(&cash_sale, &treasury, dec!(50), None, Utc::now())
        .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_delete_sale_reverses_all_twins() {
    let treasury = treasury(dec!(500));
    let mut input = sale_input(vec![line(None, 10, dec!(100))], PaymentType::Credit);
    input.paid_amount = Some(dec!(300));
    let plan =
        SalesService::plan_create_sale(&input, 1, Some(&treasury), &[], None, Utc::now()).unwrap();
    let sale = plan.sale;
    let collection =
        SalesService::plan_pay_balance(&sale, &treasury, dec!(200), None, Utc::now()).unwrap();

    let twins = vec![plan.twin.unwrap(), collection.twin];
    let reversal = SalesService::plan_delete_sale(&twins);
    // 1000 from creation plus 200 collected, all reversed.
    assert_eq!(
        reversal.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(-1200)
    );
}

#[test]
fn test_return_restocks_refunds_and_deducts_lines() {
    let treasury = treasury(dec!(2000));
    let product = ProductId::new();
    let warehouse = WarehouseId::new();
    let history = stocked(product, warehouse, 20);

    let mut input = sale_input(vec![line(Some(product), 10, dec!(100))], PaymentType::Cash);
    input.warehouse = Some(warehouse);
    let plan = SalesService::plan_create_sale(
        &input,
        1,
        Some(&treasury),
        &history,
        None,
        Utc::now(),
    )
    .unwrap();
    let sale = plan.sale;

    let mut full_history = history.clone();
    full_history.extend(plan.stock_ops);

    let return_input = CreateSaleReturnInput {
        sale: sale.id,
        items: vec![ReturnItemInput {
            product: Some(product),
            name: "cement bag".into(),
            quantity: 4,
            unit_price: dec!(100),
        }],
        reason: Some("damaged".into()),
        warehouse: Some(warehouse),
        treasury: Some(treasury.id),
        date: None,
    };
    let plan = SalesService::plan_create_return(
        &return_input,
        &sale,
        Some(&treasury),
        &full_history,
        None,
        Utc::now(),
    )
    .unwrap();

    assert_eq!(plan.sale_return.total, dec!(400));
    assert_eq!(plan.updated_items[0].quantity, 6);
    assert_eq!(plan.updated_total, dec!(600));
    assert_eq!(
        plan.deltas.net_for(DeltaTarget::TreasuryBalance(treasury.id)),
        dec!(-400)
    );
    assert_eq!(plan.stock_ops.len(), 1);
    assert_eq!(plan.stock_ops[0].kind, StockOperationKind::Return);
    let twin = plan.twin.unwrap();
    assert_eq!(twin.sale, Some(sale.id));
    assert_eq!(twin.amount, dec!(400));

    full_history.extend(plan.stock_ops);
    assert_eq!(
        InventoryService::on_hand(&full_history, product, warehouse),
        14
    );
}

#[test]
fn test_return_rejects_more_than_sold() {
    let treasury = treasury(dec!(2000));
    let input = sale_input(vec![line(None, 3, dec!(100))], PaymentType::Cash);
    let sale = SalesService::plan_create_sale(&input, 1, Some(&treasury), &[], None, Utc::now())
        .unwrap()
        .sale;

    let return_input = CreateSaleReturnInput {
        sale: sale.id,
        items: vec![ReturnItemInput {
            product: None,
            name: "cement bag".into(),
            quantity: 4,
            unit_price: dec!(100),
        }],
        reason: None,
        warehouse: None,
        treasury: None,
        date: None,
    };
    let err = SalesService::plan_create_return(
        &return_input,
        &sale,
        None,
        &[],
        None,
        Utc::now(),
    )
    .unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}
