/**
 * API Route Handlers
 *
 * Route table for the REST API.
 *
 * # Routes
 *
 * ## Authentication (public)
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login
 *
 * ## Protected (bearer token required)
 * - `GET /api/auth/me` - Current user
 * - `POST|GET /api/notes`, `GET|PUT|DELETE /api/notes/{id}`
 * - `POST|GET /api/tasks`, `GET|PUT|DELETE /api/tasks/{id}`
 * - `POST|GET /api/files`
 */

use axum::{extract::DefaultBodyLimit, middleware, routing, Router};

use crate::auth::{login, register};
use crate::files::storage::MAX_FILE_SIZE;
use crate::middleware::auth::auth_middleware;
use crate::server::state::AppState;
use crate::{auth, files, notes, tasks};

/// Configure API routes
///
/// Public auth routes are mounted as-is; everything else is wrapped in
/// the bearer-token middleware.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", routing::get(auth::get_me))
        .route(
            "/api/notes",
            routing::post(notes::handlers::create).get(notes::handlers::list),
        )
        .route(
            "/api/notes/{id}",
            routing::get(notes::handlers::get)
                .put(notes::handlers::update)
                .delete(notes::handlers::delete),
        )
        .route(
            "/api/tasks",
            routing::post(tasks::handlers::create).get(tasks::handlers::list),
        )
        .route(
            "/api/tasks/{id}",
            routing::get(tasks::handlers::get)
                .put(tasks::handlers::update)
                .delete(tasks::handlers::delete),
        )
        .route(
            "/api/files",
            routing::post(files::handlers::upload)
                .get(files::handlers::list)
                // Axum's default body limit is below the upload cap;
                // leave headroom for multipart framing
                .layer(DefaultBodyLimit::max(MAX_FILE_SIZE + 64 * 1024)),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    router
        .route("/api/auth/register", routing::post(register))
        .route("/api/auth/login", routing::post(login))
        .merge(protected)
}
