/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate name, email format, and password length
 * 2. Check if a user with this email already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database
 * 5. Generate JWT token
 * 6. Return token and user info
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never returned in responses
 * - Emails are stored lowercased so uniqueness is case-insensitive
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::auth::handlers::types::{AuthResponse, RegisterRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::ApiError;

/// Validate registration input, returning the normalized (name, email).
pub(crate) fn validate_registration(
    request: &RegisterRequest,
) -> Result<(String, String), ApiError> {
    let name = request.name.trim();
    if name.is_empty() || request.email.trim().is_empty() || request.password.is_empty() {
        return Err(ApiError::Validation(
            "Please provide all required fields: name, email, and password".to_string(),
        ));
    }

    let email = request.email.trim().to_lowercase();
    if !email.contains('@') {
        return Err(ApiError::Validation("Invalid email format".to_string()));
    }

    if request.password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    Ok((name.to_string(), email))
}

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - Missing fields, invalid email, short password
/// * `409 Conflict` - A user with this email already exists
/// * `503 Service Unavailable` - Database is not configured
/// * `500 Internal Server Error` - Hashing, insert, or token generation failed
pub async fn register(
    State(pool): State<Option<PgPool>>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let pool = pool.ok_or(ApiError::Unavailable)?;
    tracing::info!("Registration request for email: {}", request.email);

    let (name, email) = validate_registration(&request)?;

    // Check if email already exists
    if get_user_by_email(&pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(ApiError::Conflict(
            "User with this email already exists".to_string(),
        ));
    }

    // Hash password
    let password_hash = hash(&request.password, DEFAULT_COST)?;

    // Create user
    let user = create_user(&pool, name, email, password_hash).await?;

    // Create token
    let token = create_token(user.id, user.email.clone(), user.role.clone())?;

    tracing::info!("User registered successfully: {} ({})", user.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserResponse::from(user),
        }),
    ))
}
