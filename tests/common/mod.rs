//! Common test utilities and helpers
//!
//! Shared fixtures for the integration suites: server construction,
//! authentication helpers, and the gated database pool.

#![allow(dead_code)]

use axum_test::TestServer;
use sqlx::PgPool;
use uuid::Uuid;

use taskhive::auth::sessions::create_token;
use taskhive::chat::ChatRegistry;
use taskhive::routes::create_router;
use taskhive::server::AppState;

/// Build a test server with no database configured.
///
/// Endpoints that need persistence answer 503; everything else
/// (routing, auth middleware, chat transport) behaves normally.
pub fn test_server() -> TestServer {
    let state = AppState {
        db_pool: None,
        registry: ChatRegistry::new(),
    };
    TestServer::builder()
        .http_transport()
        .build(create_router(state))
        .expect("Failed to build test server")
}

/// Build a test server backed by a real database pool.
pub fn test_server_with_pool(pool: PgPool) -> TestServer {
    let state = AppState {
        db_pool: Some(pool),
        registry: ChatRegistry::new(),
    };
    TestServer::builder()
        .http_transport()
        .build(create_router(state))
        .expect("Failed to build test server")
}

/// Connect to the database named by `TEST_DATABASE_URL` and bring the
/// schema up to date, or `None` when the variable is unset.
///
/// Suites that need a live database call this and return early when it
/// yields `None`, so they pass on machines without Postgres.
pub async fn try_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("TEST_DATABASE_URL").ok()?;
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to TEST_DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    Some(pool)
}

/// Generate a signed token for an arbitrary user id.
pub fn test_token(user_id: Uuid, email: &str) -> String {
    create_token(user_id, email.to_string(), "standard".to_string())
        .expect("Failed to create test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// An email address that will not collide across test runs.
pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, Uuid::new_v4())
}
