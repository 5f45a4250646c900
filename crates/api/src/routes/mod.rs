//! API route definitions.

use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use mizan_core::error::DomainError;
use mizan_shared::AppError;
use serde_json::json;

use crate::{AppState, middleware::auth::auth_middleware};

pub mod contracts;
pub mod directory;
pub mod health;
pub mod inventory;
pub mod payroll;
pub mod sales;
pub mod transactions;
pub mod treasuries;

/// Creates the API router with protected routes that need state for middleware.
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let protected_routes = Router::new()
        .merge(treasuries::routes())
        .merge(transactions::routes())
        .merge(contracts::routes())
        .merge(sales::routes())
        .merge(inventory::routes())
        .merge(payroll::routes())
        .merge(directory::routes())
        .layer(middleware::from_fn_with_state(state, auth_middleware));

    Router::new().merge(health::routes()).merge(protected_routes)
}

/// Maps a domain error onto its HTTP response.
pub(crate) fn domain_error_response(err: DomainError) -> Response {
    let code = err.error_code();
    let message = err.to_string();
    let status = StatusCode::from_u16(AppError::from(err).status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({ "error": code, "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod error_response_tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_domain_errors_map_to_http_statuses() {
        let resp = domain_error_response(DomainError::NotFound { entity: "treasury" });
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = domain_error_response(DomainError::InsufficientBalance {
            treasury: "Main Safe".into(),
            available: dec!(10),
            required: dec!(25),
        });
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = domain_error_response(DomainError::DuplicateReference("name taken".into()));
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
