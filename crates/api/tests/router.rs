//! Router-level tests: auth gate, role gate, and one full request cycle.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use mizan_api::{AppState, create_router};
use mizan_shared::{JwtConfig, JwtService, Role};
use mizan_store::MemoryStore;

fn test_state() -> AppState {
    AppState {
        store: MemoryStore::new(),
        jwt_service: Arc::new(JwtService::new(JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expires_minutes: 15,
        })),
    }
}

fn token(state: &AppState, role: Role) -> String {
    state
        .jwt_service
        .generate_access_token(Uuid::new_v4(), role)
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = create_router(test_state());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/treasuries")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "missing_token");
}

#[tokio::test]
async fn engineers_cannot_move_money() {
    let state = test_state();
    let token = token(&state, Role::Engineer);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/treasuries")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Main Safe",
                        "initial_balance": "1000",
                        "kind": "cash"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn manager_creates_and_reads_a_treasury() {
    let state = test_state();
    let token = token(&state, Role::Manager);
    let app = create_router(state);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/treasuries")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "name": "Main Safe",
                        "initial_balance": "1000",
                        "kind": "cash"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Main Safe");
    let id = created["id"].as_str().unwrap().to_owned();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/treasuries/{id}"))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["current_balance"], "1000");
}

#[tokio::test]
async fn unknown_treasury_is_a_404() {
    let state = test_state();
    let token = token(&state, Role::Manager);
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/v1/treasuries/{}", Uuid::now_v7()))
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
}
