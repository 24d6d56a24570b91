//! Request Middleware
//!
//! Middleware applied to protected routes.
//!
//! - **`auth`** - Bearer-token verification and the `AuthUser` extractor
//! - **`roles`** - Role-based access control for privileged routes

/// Authentication middleware
pub mod auth;

/// Role-based access control
pub mod roles;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use roles::require_role;
