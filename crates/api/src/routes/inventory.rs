//! Stock operation routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Deserialize;

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::inventory::CreateStockOperationInput;
use mizan_shared::types::{ProductId, StockOperationId, WarehouseId};
use mizan_store::repositories::{StockRepository, UpdateStockOperationInput};

/// Creates the inventory routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stock-operations", get(list_operations))
        .route("/stock-operations", post(create_operation))
        .route("/stock-operations/{id}", put(update_operation))
        .route("/stock-operations/{id}", delete(delete_operation))
        .route("/warehouses/{id}/stock", get(warehouse_stock))
}

/// Query parameters for listing stock operations.
#[derive(Debug, Deserialize)]
pub struct ListOperationsQuery {
    /// Filter by product.
    pub product: Option<ProductId>,
    /// Filter by warehouse (as source or transfer destination).
    pub warehouse: Option<WarehouseId>,
}

/// GET `/stock-operations` - List movements, newest first.
async fn list_operations(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListOperationsQuery>,
) -> Response {
    let repo = StockRepository::new(state.store.clone());
    Json(repo.list(query.product, query.warehouse).await).into_response()
}

/// POST `/stock-operations` - Record a stock movement.
async fn create_operation(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateStockOperationInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = StockRepository::new(state.store.clone());
    match repo.create(payload, Some(auth.user_id())).await {
        Ok(op) => (StatusCode::CREATED, Json(op)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/stock-operations/{id}` - Edit a movement through the fold guard.
async fn update_operation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StockOperationId>,
    Json(payload): Json<UpdateStockOperationInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = StockRepository::new(state.store.clone());
    match repo.update(id, payload).await {
        Ok(op) => Json(op).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/stock-operations/{id}` - Delete a movement if history stays valid.
async fn delete_operation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<StockOperationId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = StockRepository::new(state.store.clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/warehouses/{id}/stock` - Folded on-hand levels for a warehouse.
async fn warehouse_stock(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<WarehouseId>,
) -> Response {
    let repo = StockRepository::new(state.store.clone());
    Json(repo.warehouse_levels(id).await).into_response()
}
