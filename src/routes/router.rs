/**
 * Router Configuration
 *
 * The main router creation function that combines all route
 * configurations into a single Axum router.
 *
 * # Route Order
 *
 * 1. Root and health endpoints
 * 2. Chat WebSocket endpoint
 * 3. API routes (auth, notes, tasks, files)
 * 4. Static serving of uploaded files
 * 5. Fallback handler (404 JSON)
 */

use axum::{http::StatusCode, response::Json, routing, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::chat::ws::chat_ws;
use crate::files::storage::upload_dir;
use crate::routes::api_routes::configure_api_routes;
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state (database pool, chat registry)
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new()
        .route(
            "/",
            routing::get(|| async { Json(serde_json::json!({ "message": "API running" })) }),
        )
        .route("/health", routing::get(health))
        .route("/ws", routing::get(chat_ws));

    let router = configure_api_routes(router, &app_state);

    // Uploaded files are served back at the URL recorded in metadata
    let router = router.nest_service("/uploads", ServeDir::new(upload_dir()));

    let router = router.fallback(|| async {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "message": "Route not found" })),
        )
    });

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

/// Health check endpoint
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
