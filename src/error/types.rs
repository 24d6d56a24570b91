/**
 * API Error Types
 *
 * This module defines the error type used by HTTP handlers. Every
 * handler returns `Result<_, ApiError>`, and the `IntoResponse`
 * implementation in `conversion.rs` turns the error into a JSON body
 * with the matching status code.
 *
 * # Error Categories
 *
 * - Client faults: `Validation`, `Unauthorized`, `Forbidden`,
 *   `NotFound`, `Conflict`
 * - Server faults: `Unavailable` (database not configured),
 *   `Persistence` (sqlx), `Storage` (disk I/O), `Hash` (bcrypt),
 *   `Token` (jsonwebtoken)
 *
 * Server-fault details are logged where they occur; the response body
 * carries a generic message so internals never leak to clients.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request input (missing fields, bad formats).
    #[error("{0}")]
    Validation(String),

    /// Missing, malformed, or expired credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed to touch the record.
    #[error("{0}")]
    Forbidden(String),

    /// Record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness violation (e.g. email already registered).
    #[error("{0}")]
    Conflict(String),

    /// Database pool is not configured (DATABASE_URL unset or unreachable).
    #[error("Database not configured")]
    Unavailable,

    /// Database query failure.
    #[error("Database error: {0}")]
    Persistence(#[from] sqlx::Error),

    /// Disk I/O failure (upload storage).
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Password hashing failure.
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// JWT creation/verification failure.
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Map this error to its HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Persistence(_) | Self::Storage(_) | Self::Hash(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message sent to the client. Server faults get a generic
    /// message; the detailed cause is only logged.
    pub fn message(&self) -> String {
        match self {
            Self::Validation(m)
            | Self::Unauthorized(m)
            | Self::Forbidden(m)
            | Self::NotFound(m)
            | Self::Conflict(m) => m.clone(),
            Self::Unavailable => "Database not configured".to_string(),
            Self::Persistence(_) | Self::Storage(_) | Self::Hash(_) | Self::Token(_) => {
                "Internal server error. Please try again later.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_fault_status_codes() {
        assert_eq!(
            ApiError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Unauthorized("no token".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("not yours".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("gone".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("dup".into()).status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_server_fault_status_codes() {
        assert_eq!(
            ApiError::Unavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::Persistence(sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Storage(std::io::Error::other("disk full")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_client_fault_message_passthrough() {
        let err = ApiError::Validation("Please provide title and content".into());
        assert_eq!(err.message(), "Please provide title and content");
    }

    #[test]
    fn test_server_fault_message_is_generic() {
        let err = ApiError::Persistence(sqlx::Error::RowNotFound);
        assert_eq!(err.message(), "Internal server error. Please try again later.");
        assert!(!err.message().contains("RowNotFound"));

        let err = ApiError::Storage(std::io::Error::other("disk full"));
        assert_eq!(err.message(), "Internal server error. Please try again later.");
        assert!(!err.message().contains("disk full"));
    }
}
