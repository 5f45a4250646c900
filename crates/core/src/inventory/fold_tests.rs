use chrono::{Duration, Utc};

use super::*;
use mizan_shared::types::{ProductId, WarehouseId};

struct Fixture {
    product: ProductId,
    warehouse: WarehouseId,
    other: WarehouseId,
    ops: Vec<StockOperation>,
    day: i64,
}

impl Fixture {
    fn new() -> Self {
        Self {
            product: ProductId::new(),
            warehouse: WarehouseId::new(),
            other: WarehouseId::new(),
            ops: Vec::new(),
            day: 0,
        }
    }

    fn op(&mut self, kind: StockOperationKind, quantity: i64) -> StockOperation {
        let base = Utc::now() - Duration::days(100);
        self.day += 1;
        let op = StockOperation::create(
            CreateStockOperationInput {
                product: self.product,
                warehouse: self.warehouse,
                transfer_to: if kind == StockOperationKind::Transfer {
                    Some(self.other)
                } else {
                    None
                },
                kind,
                quantity,
                notes: None,
                date: Some(base + Duration::days(self.day)),
            },
            None,
            Utc::now(),
        )
        .unwrap();
        self.ops.push(op.clone());
        op
    }
}

#[test]
fn test_on_hand_folds_all_kinds() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 100);
    fx.op(StockOperationKind::Issue, 30);
    fx.op(StockOperationKind::Sale, 20);
    fx.op(StockOperationKind::Return, 5);

    assert_eq!(
        InventoryService::on_hand(&fx.ops, fx.product, fx.warehouse),
        55
    );
}

#[test]
fn test_transfer_moves_between_warehouses() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 80);
    fx.op(StockOperationKind::Transfer, 30);

    assert_eq!(
        InventoryService::on_hand(&fx.ops, fx.product, fx.warehouse),
        50
    );
    assert_eq!(InventoryService::on_hand(&fx.ops, fx.product, fx.other), 30);
}

#[test]
fn test_on_hand_ignores_other_products() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 40);

    assert_eq!(
        InventoryService::on_hand(&fx.ops, ProductId::new(), fx.warehouse),
        0
    );
}

#[test]
fn test_check_apply_rejects_overdraw() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 10);

    let mut probe = Fixture::new();
    probe.product = fx.product;
    probe.warehouse = fx.warehouse;
    probe.day = fx.day;
    let issue = probe.op(StockOperationKind::Issue, 11);

    let err = InventoryService::check_apply(&fx.ops, &issue).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_check_apply_rejects_issue_dated_before_the_add() {
    let mut fx = Fixture::new();
    let add = fx.op(StockOperationKind::Add, 10);

    // Backdated issue lands before the add in the fold.
    let issue = StockOperation::create(
        CreateStockOperationInput {
            product: fx.product,
            warehouse: fx.warehouse,
            transfer_to: None,
            kind: StockOperationKind::Issue,
            quantity: 5,
            notes: None,
            date: Some(add.date - Duration::days(1)),
        },
        None,
        Utc::now(),
    )
    .unwrap();

    assert!(InventoryService::check_apply(&fx.ops, &issue).is_err());
}

#[test]
fn test_check_delete_blocks_consumed_add() {
    let mut fx = Fixture::new();
    let add = fx.op(StockOperationKind::Add, 10);
    fx.op(StockOperationKind::Issue, 8);

    let err = InventoryService::check_delete(&fx.ops, add.id).unwrap_err();
    assert_eq!(err.error_code(), "VALIDATION_ERROR");
}

#[test]
fn test_check_delete_allows_unconsumed_add() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 10);
    let second = fx.op(StockOperationKind::Add, 5);
    fx.op(StockOperationKind::Issue, 8);

    assert!(InventoryService::check_delete(&fx.ops, second.id).is_err());

    // Deleting the later, unconsumed issue is always fine.
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 10);
    let issue = fx.op(StockOperationKind::Issue, 8);
    assert!(InventoryService::check_delete(&fx.ops, issue.id).is_ok());
}

#[test]
fn test_check_delete_unknown_id() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 10);

    let err =
        InventoryService::check_delete(&fx.ops, mizan_shared::types::StockOperationId::new())
            .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[test]
fn test_check_replace_guards_quantity_changes() {
    let mut fx = Fixture::new();
    let add = fx.op(StockOperationKind::Add, 10);
    fx.op(StockOperationKind::Issue, 8);

    // Shrinking the add below what was consumed is rejected.
    let mut shrunk = add.clone();
    shrunk.quantity = 7;
    assert!(InventoryService::check_replace(&fx.ops, &shrunk).is_err());

    // Growing it is fine.
    let mut grown = add.clone();
    grown.quantity = 20;
    assert!(InventoryService::check_replace(&fx.ops, &grown).is_ok());
}

#[test]
fn test_check_replace_guards_transfer_destination() {
    let mut fx = Fixture::new();
    fx.op(StockOperationKind::Add, 10);
    let transfer = fx.op(StockOperationKind::Transfer, 6);
    // Destination warehouse consumed what arrived.
    let issue_at_other = StockOperation::create(
        CreateStockOperationInput {
            product: fx.product,
            warehouse: fx.other,
            transfer_to: None,
            kind: StockOperationKind::Issue,
            quantity: 6,
            notes: None,
            date: Some(transfer.date + Duration::days(1)),
        },
        None,
        Utc::now(),
    )
    .unwrap();
    fx.ops.push(issue_at_other);

    // Shrinking the transfer would leave the destination short.
    let mut shrunk = transfer.clone();
    shrunk.quantity = 4;
    assert!(InventoryService::check_replace(&fx.ops, &shrunk).is_err());
}
