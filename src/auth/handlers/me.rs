/**
 * Get Current User Handler
 *
 * This module implements GET /api/auth/me. The auth middleware has
 * already verified the bearer token; this handler loads the full user
 * record for the authenticated identity.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Errors
///
/// * `401 Unauthorized` - Token missing or invalid (rejected by middleware)
/// * `404 Not Found` - Token is valid but the user no longer exists
/// * `503 Service Unavailable` - Database is not configured
pub async fn get_me(
    State(pool): State<Option<PgPool>>,
    AuthUser(current): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;

    let user = get_user_by_id(&pool, current.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserResponse::from(user)))
}
