//! Ledger transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Deserialize;

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::ledger::{CreateTransactionInput, TransactionUpdate};
use mizan_shared::types::{ProjectId, TransactionId, TreasuryId};
use mizan_store::repositories::TransactionRepository;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/transactions", get(list_transactions))
        .route("/transactions", post(create_transaction))
        .route("/transactions/{id}", get(get_transaction))
        .route("/transactions/{id}", put(update_transaction))
        .route("/transactions/{id}", delete(delete_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Filter by source or target treasury.
    pub treasury: Option<TreasuryId>,
    /// Filter by project.
    pub project: Option<ProjectId>,
}

/// GET `/transactions` - List transactions visible to the caller.
async fn list_transactions(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTransactionsQuery>,
) -> Response {
    let repo = TransactionRepository::new(state.store.clone());
    let transactions = repo.list(&auth.scope(), query.treasury, query.project).await;
    Json(transactions).into_response()
}

/// POST `/transactions` - Record a deposit, withdrawal or transfer.
async fn create_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTransactionInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.create(payload, Some(auth.user_id())).await {
        Ok(tx) => (StatusCode::CREATED, Json(tx)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/transactions/{id}` - Get one transaction.
async fn get_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
) -> Response {
    let repo = TransactionRepository::new(state.store.clone());
    match repo.get(id, &auth.scope()).await {
        Ok(tx) => Json(tx).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/transactions/{id}` - Update descriptive fields only.
async fn update_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
    Json(payload): Json<TransactionUpdate>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.update(id, payload).await {
        Ok(tx) => Json(tx).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/transactions/{id}` - Delete a transaction, reversing its effects.
async fn delete_transaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TransactionId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TransactionRepository::new(state.store.clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}
