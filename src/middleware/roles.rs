/**
 * Role-Based Access Control Middleware
 *
 * Restricts access based on the role carried in the verified token.
 * Must run after `auth_middleware`, which attaches the identity to the
 * request extensions.
 *
 * Usage:
 *
 * ```ignore
 * router.route_layer(middleware::from_fn(require_role(&["admin"])))
 * ```
 */

use axum::{extract::Request, middleware::Next, response::Response};

use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;

/// Check that an authenticated identity carries one of the allowed roles.
///
/// Returns 401 when no identity is present (the auth middleware did not
/// run) and 403 when the role is not in the list.
pub fn check_role(user: Option<&AuthenticatedUser>, allowed: &[&str]) -> Result<(), ApiError> {
    let user = user.ok_or_else(|| {
        ApiError::Unauthorized("Access denied. Authentication required.".to_string())
    })?;

    if !allowed.contains(&user.role.as_str()) {
        tracing::warn!("Role '{}' denied, requires one of {:?}", user.role, allowed);
        return Err(ApiError::Forbidden(
            "Access denied. You do not have permission to perform this action.".to_string(),
        ));
    }

    Ok(())
}

/// Build a middleware that only passes requests whose user holds one of
/// `allowed_roles`.
pub fn require_role(
    allowed_roles: &'static [&'static str],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, ApiError>> + Send>>
       + Clone {
    move |request: Request, next: Next| {
        Box::pin(async move {
            check_role(request.extensions().get::<AuthenticatedUser>(), allowed_roles)?;
            Ok(next.run(request).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user(role: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: Uuid::new_v4(),
            email: "test@example.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn test_check_role_allowed() {
        assert!(check_role(Some(&user("admin")), &["admin"]).is_ok());
        assert!(check_role(Some(&user("standard")), &["admin", "standard"]).is_ok());
    }

    #[test]
    fn test_check_role_forbidden() {
        let result = check_role(Some(&user("standard")), &["admin"]);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }

    #[test]
    fn test_check_role_unauthenticated() {
        let result = check_role(None, &["admin"]);
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
