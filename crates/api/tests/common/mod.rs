//! Shared helpers for API integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use stockroom_api::auth::jwt::{generate_access_token, JwtConfig};
use stockroom_api::config::ServerConfig;
use stockroom_api::router::build_app_router;
use stockroom_api::state::AppState;
use stockroom_db::models::item::CreateItem;
use stockroom_db::models::storage_area::CreateStorageArea;
use stockroom_db::models::user::CreateUser;
use stockroom_db::repositories::{ItemRepo, StorageAreaRepo, UserRepo};

pub const TEST_JWT_SECRET: &str = "stockroom-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_router(AppState::new(pool, test_config()))
}

/// Signed access token for a user id and role.
pub fn token_for(user_id: i64, role: &str) -> String {
    generate_access_token(user_id, role, &test_config().jwt).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub async fn create_user(pool: &PgPool, name: &str, role: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: name.to_string(),
            email: format!("{}@stockroom.test", name.to_lowercase()),
            role: role.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn create_item(pool: &PgPool, sku: &str, name: &str) -> i64 {
    ItemRepo::create(
        pool,
        &CreateItem {
            sku: sku.to_string(),
            name: name.to_string(),
            category: None,
            unit: None,
            reorder_level: None,
            notes: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn create_area(pool: &PgPool, code: &str, name: &str) -> i64 {
    StorageAreaRepo::create(
        pool,
        &CreateStorageArea {
            code: code.to_string(),
            name: name.to_string(),
            description: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn movement_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stock_movements")
        .fetch_one(pool)
        .await
        .unwrap()
}
