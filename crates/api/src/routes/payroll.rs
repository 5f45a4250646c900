//! Payroll routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::payroll::{CreateSalaryTransactionInput, SalaryTransactionUpdate};
use mizan_shared::types::{EmployeeId, SalaryTransactionId};
use mizan_store::repositories::PayrollRepository;

/// Creates the payroll routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/salary-transactions", post(create_entry))
        .route("/salary-transactions/{id}", put(update_entry))
        .route("/salary-transactions/{id}", delete(delete_entry))
        .route(
            "/employees/{id}/salary-transactions",
            get(list_employee_entries),
        )
}

/// POST `/salary-transactions` - Record a salary entry.
async fn create_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateSalaryTransactionInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = PayrollRepository::new(state.store.clone());
    match repo.create(payload, Some(auth.user_id())).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/salary-transactions/{id}` - Edit an entry; the chain recomputes.
async fn update_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<SalaryTransactionId>,
    Json(payload): Json<SalaryTransactionUpdate>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = PayrollRepository::new(state.store.clone());
    match repo.update(id, payload).await {
        Ok(entry) => Json(entry).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/salary-transactions/{id}` - Remove an entry; the chain recomputes.
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<SalaryTransactionId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = PayrollRepository::new(state.store.clone());
    match repo.delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/employees/{id}/salary-transactions` - An employee's chain, oldest
/// first.
async fn list_employee_entries(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<EmployeeId>,
) -> Response {
    let repo = PayrollRepository::new(state.store.clone());
    match repo.list(id).await {
        Ok(entries) => Json(entries).into_response(),
        Err(err) => domain_error_response(err),
    }
}
