/**
 * Server Initialization
 *
 * Initialization and setup of the Axum HTTP server: state creation,
 * database loading, upload directory, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Create the chat connection registry
 * 2. Load the optional database (connect + migrate, warn-and-continue)
 * 3. Ensure the upload directory exists
 * 4. Create and configure the router
 */

use axum::Router;

use crate::chat::registry::ChatRegistry;
use crate::files::storage::{ensure_upload_dir, upload_dir};
use crate::routes::router::create_router;
use crate::server::config::load_database;
use crate::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// Startup is resilient: a missing database or an upload-directory
/// failure is logged and the server continues with that feature
/// degraded.
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing taskhive backend server");

    let registry = ChatRegistry::new();

    let db_pool = load_database().await;

    let dir = upload_dir();
    if let Err(e) = ensure_upload_dir(&dir).await {
        tracing::error!("Failed to create upload directory {:?}: {:?}", dir, e);
        tracing::warn!("File uploads will fail until the directory is writable");
    }

    let app_state = AppState { db_pool, registry };

    tracing::info!("Application state initialized");

    create_router(app_state)
}
