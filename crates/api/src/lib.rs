//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for treasuries, transactions, contracts, sales,
//!   inventory, payroll and reference data
//! - Authentication middleware validating bearer tokens
//! - Role checks gating financial mutations

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use mizan_shared::JwtService;
use mizan_store::MemoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The in-memory document store.
    pub store: MemoryStore,
    /// JWT service for token validation.
    pub jwt_service: Arc<JwtService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
