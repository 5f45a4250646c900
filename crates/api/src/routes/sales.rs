//! Sales invoice, collection and return routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::sales::{CreateSaleInput, CreateSaleReturnInput};
use mizan_shared::types::{SaleId, TreasuryId};
use mizan_store::repositories::SaleRepository;

/// Creates the sales routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sales", get(list_sales))
        .route("/sales", post(create_sale))
        .route("/sales/{id}", get(get_sale))
        .route("/sales/{id}", delete(delete_sale))
        .route("/sales/{id}/pay", post(pay_balance))
        .route("/sale-returns", get(list_returns))
        .route("/sale-returns", post(create_return))
}

/// Request body for collecting part of a credit sale's balance.
#[derive(Debug, Deserialize)]
pub struct PayBalanceRequest {
    /// Amount to collect. Must be positive and at most the balance.
    pub amount: Decimal,
    /// Treasury the money lands in. Defaults to the sale's own.
    pub treasury: Option<TreasuryId>,
}

/// Query parameters for listing returns.
#[derive(Debug, Deserialize)]
pub struct ListReturnsQuery {
    /// Filter by sale.
    pub sale: Option<SaleId>,
}

/// GET `/sales` - List sales, newest first.
async fn list_sales(State(state): State<AppState>, _auth: AuthUser) -> Response {
    let repo = SaleRepository::new(state.store.clone());
    Json(repo.list().await).into_response()
}

/// POST `/sales` - Record a sale or quote.
async fn create_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSaleInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = SaleRepository::new(state.store.clone());
    match repo.create(payload, Some(auth.user_id())).await {
        Ok(sale) => (StatusCode::CREATED, Json(sale)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/sales/{id}` - Get one sale.
async fn get_sale(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<SaleId>,
) -> Response {
    let repo = SaleRepository::new(state.store.clone());
    match repo.get(id).await {
        Ok(sale) => Json(sale).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/sales/{id}` - Delete a sale, reversing its twin transactions.
async fn delete_sale(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<SaleId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = SaleRepository::new(state.store.clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// POST `/sales/{id}/pay` - Collect part of a credit sale's balance.
async fn pay_balance(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<SaleId>,
    Json(payload): Json<PayBalanceRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = SaleRepository::new(state.store.clone());
    match repo
        .pay_balance(id, payload.amount, payload.treasury, Some(auth.user_id()))
        .await
    {
        Ok(sale) => Json(sale).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/sale-returns` - List returns.
async fn list_returns(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListReturnsQuery>,
) -> Response {
    let repo = SaleRepository::new(state.store.clone());
    Json(repo.list_returns(query.sale).await).into_response()
}

/// POST `/sale-returns` - Record a return against a sale.
async fn create_return(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSaleReturnInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = SaleRepository::new(state.store.clone());
    match repo.create_return(payload, Some(auth.user_id())).await {
        Ok(ret) => (StatusCode::CREATED, Json(ret)).into_response(),
        Err(err) => domain_error_response(err),
    }
}
