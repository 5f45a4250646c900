//! Treasury management routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::treasury::CreateTreasuryInput;
use mizan_shared::types::TreasuryId;
use mizan_store::repositories::{TreasuryRepository, UpdateTreasuryInput};

/// Creates the treasury routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/treasuries", get(list_treasuries))
        .route("/treasuries", post(create_treasury))
        .route("/treasuries/{id}", get(get_treasury))
        .route("/treasuries/{id}", put(update_treasury))
        .route("/treasuries/{id}", delete(delete_treasury))
        .route("/treasuries/{id}/details", get(treasury_details))
}

/// GET `/treasuries` - List treasuries visible to the caller.
async fn list_treasuries(State(state): State<AppState>, auth: AuthUser) -> Response {
    let repo = TreasuryRepository::new(state.store.clone());
    let treasuries = repo.list(&auth.scope()).await;
    Json(treasuries).into_response()
}

/// POST `/treasuries` - Open a treasury.
async fn create_treasury(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateTreasuryInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TreasuryRepository::new(state.store.clone());
    match repo.create(payload).await {
        Ok(treasury) => (StatusCode::CREATED, Json(treasury)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/treasuries/{id}` - Get one treasury.
async fn get_treasury(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TreasuryId>,
) -> Response {
    let repo = TreasuryRepository::new(state.store.clone());
    match repo.get(id, &auth.scope()).await {
        Ok(treasury) => Json(treasury).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/treasuries/{id}` - Update descriptive fields and opening balance.
async fn update_treasury(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TreasuryId>,
    Json(payload): Json<UpdateTreasuryInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TreasuryRepository::new(state.store.clone());
    match repo.update(id, payload).await {
        Ok(treasury) => Json(treasury).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/treasuries/{id}` - Delete a treasury with no history.
async fn delete_treasury(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TreasuryId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = TreasuryRepository::new(state.store.clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/treasuries/{id}/details` - Treasury with its ledger and totals.
async fn treasury_details(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<TreasuryId>,
) -> Response {
    let repo = TreasuryRepository::new(state.store.clone());
    match repo.details(id, &auth.scope()).await {
        Ok(details) => Json(details).into_response(),
        Err(err) => domain_error_response(err),
    }
}
