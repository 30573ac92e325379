#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use pagelock_api::auth::jwt::{generate_access_token, JwtConfig};
use pagelock_api::config::ServerConfig;
use pagelock_api::router::build_app_router;
use pagelock_api::state::AppState;
use pagelock_core::settings::LockSettings;
use pagelock_db::host::PgHost;
use sqlx::PgPool;
use tower::ServiceExt;

pub const ADMIN_ID: i64 = 1;
pub const EDITOR_ID: i64 = 2;
pub const VIEWER_ID: i64 = 3;

/// Build a test `ServerConfig` with safe defaults and the default lock settings.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        locks: LockSettings::default(),
    }
}

/// Build the full application router over `pool`, with the same middleware
/// stack as production.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        host: Arc::new(PgHost::new(pool)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

pub fn token(user_id: i64, role: &str, permissions: &[&str]) -> String {
    generate_access_token(user_id, role, permissions, &test_config().jwt)
        .expect("token generation should succeed")
}

pub fn admin_token() -> String {
    token(ADMIN_ID, "admin", &[])
}

/// An editor holding the `page-lock` permission.
pub fn editor_token() -> String {
    token(EDITOR_ID, "editor", &["page-edit", "page-lock"])
}

/// An editor without the `page-lock` permission.
pub fn viewer_token() -> String {
    token(VIEWER_ID, "editor", &["page-edit"])
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

/// Unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_as(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_as(
    app: Router,
    uri: &str,
    token: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), body).await
}

pub async fn delete_as(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
