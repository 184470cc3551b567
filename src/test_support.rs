//! Shared fixtures for in-crate tests: an in-memory database, state, users
//! and a one-shot request helper.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tower::ServiceExt;

use crate::auth::accounts::{ensure_user, find_or_create_user, issue_token};
use crate::auth::User;
use crate::common::dev_mode::DevModeConfig;
use crate::common::migrations::run_migrations;
use crate::common::{AppState, SharedState};

pub const TEST_SECRET: &str = "test_secret_key";

/// Single connection, otherwise every pooled connection gets its own empty database
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    run_migrations(&pool, false)
        .await
        .expect("failed to run migrations");
    pool
}

pub async fn test_state(dev_mode: bool) -> (SharedState, SqlitePool) {
    let pool = memory_pool().await;
    let dev_mode = DevModeConfig {
        enabled: dev_mode,
        ..DevModeConfig::disabled()
    };

    if dev_mode.is_enabled() {
        ensure_user(&pool, &dev_mode.create_dev_user())
            .await
            .expect("failed to seed dev user");
    }

    let state = AppState {
        db: pool.clone(),
        jwt_secret: TEST_SECRET.to_string(),
        dev_mode,
    };

    (state.into_shared(), pool)
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    find_or_create_user(pool, username)
        .await
        .expect("failed to create user")
}

pub fn bearer_for(user: &User) -> String {
    let token = issue_token(TEST_SECRET, &user.id, Duration::hours(1)).expect("failed to sign");
    format!("Bearer {}", token)
}

pub fn request(method: Method, uri: &str, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn get(uri: &str, auth: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, auth)
}

pub fn json_request(method: Method, uri: &str, body: Value, auth: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(auth) = auth {
        builder = builder.header(header::AUTHORIZATION, auth);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Runs one request; an empty body comes back as `Value::Null`
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}
