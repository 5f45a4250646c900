use chrono::{Duration, Utc};
use proptest::prelude::*;

use super::*;
use mizan_shared::types::{ProductId, WarehouseId};

#[derive(Debug, Clone)]
enum Move {
    Add(i64),
    Issue(i64),
    Transfer(i64),
}

fn arb_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        (1i64..50).prop_map(Move::Add),
        (1i64..50).prop_map(Move::Issue),
        (1i64..50).prop_map(Move::Transfer),
    ]
}

/// Builds a history by applying each candidate only when the guard accepts
/// it, mirroring how the store admits operations.
fn build_history(moves: Vec<Move>) -> (Vec<StockOperation>, ProductId, WarehouseId, WarehouseId) {
    let product = ProductId::new();
    let warehouse = WarehouseId::new();
    let other = WarehouseId::new();
    let base = Utc::now() - Duration::days(1000);

    let mut ops: Vec<StockOperation> = Vec::new();
    for (day, mv) in moves.into_iter().enumerate() {
        let (kind, quantity, transfer_to) = match mv {
            Move::Add(q) => (StockOperationKind::Add, q, None),
            Move::Issue(q) => (StockOperationKind::Issue, q, None),
            Move::Transfer(q) => (StockOperationKind::Transfer, q, Some(other)),
        };
        let candidate = StockOperation::create(
            CreateStockOperationInput {
                product,
                warehouse,
                transfer_to,
                kind,
                quantity,
                notes: None,
                date: Some(base + Duration::days(i64::try_from(day).unwrap())),
            },
            None,
            Utc::now(),
        )
        .unwrap();
        if InventoryService::check_apply(&ops, &candidate).is_ok() {
            ops.push(candidate);
        }
    }
    (ops, product, warehouse, other)
}

proptest! {
    #[test]
    fn prop_admitted_history_never_goes_negative(moves in prop::collection::vec(arb_move(), 0..24)) {
        let (ops, product, warehouse, other) = build_history(moves);

        for end in 0..=ops.len() {
            prop_assert!(InventoryService::on_hand(&ops[..end], product, warehouse) >= 0);
            prop_assert!(InventoryService::on_hand(&ops[..end], product, other) >= 0);
        }
    }

    #[test]
    fn prop_accepted_delete_preserves_non_negativity(moves in prop::collection::vec(arb_move(), 1..24)) {
        let (ops, product, warehouse, other) = build_history(moves);

        for op in &ops {
            if InventoryService::check_delete(&ops, op.id).is_ok() {
                let remaining: Vec<StockOperation> =
                    ops.iter().filter(|o| o.id != op.id).cloned().collect();
                for end in 0..=remaining.len() {
                    prop_assert!(InventoryService::on_hand(&remaining[..end], product, warehouse) >= 0);
                    prop_assert!(InventoryService::on_hand(&remaining[..end], product, other) >= 0);
                }
            }
        }
    }
}
