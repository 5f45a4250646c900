//! Contract agreement and contractor payment routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{AppState, middleware::AuthUser, routes::domain_error_response};
use mizan_core::contracts::{CreateAgreementInput, CreatePaymentInput};
use mizan_shared::types::{AgreementId, PaymentId, ProjectId};
use mizan_store::repositories::ContractRepository;

/// Creates the contract routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agreements", get(list_agreements))
        .route("/agreements", post(create_agreement))
        .route("/agreements/{id}", get(get_agreement))
        .route("/agreements/{id}", put(update_agreement))
        .route("/agreements/{id}", delete(delete_agreement))
        .route("/contract-payments", get(list_payments))
        .route("/contract-payments", post(create_payment))
        .route("/contract-payments/{id}", put(update_payment))
        .route("/contract-payments/{id}", delete(delete_payment))
}

/// Query parameters for listing agreements.
#[derive(Debug, Deserialize)]
pub struct ListAgreementsQuery {
    /// Filter by project.
    pub project: Option<ProjectId>,
}

/// Query parameters for listing payments.
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    /// Filter by agreement.
    pub agreement: Option<AgreementId>,
    /// Filter by project.
    pub project: Option<ProjectId>,
}

/// Request body for changing an agreement's committed amount.
#[derive(Debug, Deserialize)]
pub struct UpdateAgreementRequest {
    /// New committed amount. Must be positive and at least the paid amount.
    pub agreed_amount: Decimal,
}

/// GET `/agreements` - List agreements.
async fn list_agreements(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListAgreementsQuery>,
) -> Response {
    let repo = ContractRepository::new(state.store.clone());
    let agreements = repo.list_agreements(query.project).await;
    Json(agreements).into_response()
}

/// POST `/agreements` - Record an agreement.
async fn create_agreement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreateAgreementInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.create_agreement(payload).await {
        Ok(agreement) => (StatusCode::CREATED, Json(agreement)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/agreements/{id}` - Get one agreement.
async fn get_agreement(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<AgreementId>,
) -> Response {
    let repo = ContractRepository::new(state.store.clone());
    match repo.get_agreement(id).await {
        Ok(agreement) => Json(agreement).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/agreements/{id}` - Change the committed amount.
async fn update_agreement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AgreementId>,
    Json(payload): Json<UpdateAgreementRequest>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.update_agreement(id, payload.agreed_amount).await {
        Ok(agreement) => Json(agreement).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/agreements/{id}` - Delete an agreement with no payments.
async fn delete_agreement(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<AgreementId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.delete_agreement(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// GET `/contract-payments` - List payments.
async fn list_payments(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListPaymentsQuery>,
) -> Response {
    let repo = ContractRepository::new(state.store.clone());
    let payments = repo.list_payments(query.agreement, query.project).await;
    Json(payments).into_response()
}

/// POST `/contract-payments` - Settle part of an agreement.
async fn create_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(payload): Json<CreatePaymentInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.create_payment(payload, Some(auth.user_id())).await {
        Ok(payment) => (StatusCode::CREATED, Json(payment)).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// PUT `/contract-payments/{id}` - Replace a payment's values.
async fn update_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PaymentId>,
    Json(payload): Json<CreatePaymentInput>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.update_payment(id, payload, Some(auth.user_id())).await {
        Ok(payment) => Json(payment).into_response(),
        Err(err) => domain_error_response(err),
    }
}

/// DELETE `/contract-payments/{id}` - Reverse a payment.
async fn delete_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<PaymentId>,
) -> Response {
    if let Err(response) = auth.require_finance_role() {
        return response;
    }

    let repo = ContractRepository::new(state.store.clone());
    match repo.delete_payment(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => domain_error_response(err),
    }
}
