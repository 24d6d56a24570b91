/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the `FromRef` traits for Axum state extraction.
 *
 * # Thread Safety
 *
 * - `PgPool` is internally reference-counted and thread-safe
 * - `ChatRegistry` is a cloneable handle over a mutex-guarded map
 * - Handlers extract just the slice of state they need via `FromRef`
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::chat::registry::ChatRegistry;

/// Central state container for the Axum application.
///
/// # Fields
///
/// * `db_pool` - `None` if the database is not configured
///   (`DATABASE_URL` unset); handlers answer 503 / emit an error event
///   when they need it and it is absent.
/// * `registry` - live chat connections and room memberships.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db_pool: Option<PgPool>,

    /// Chat connection registry
    pub registry: ChatRegistry,
}

/// Allow handlers to extract `Option<PgPool>` directly from `AppState`.
impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the chat registry directly from `AppState`.
impl FromRef<AppState> for ChatRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}
