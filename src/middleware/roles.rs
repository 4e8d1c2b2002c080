/**
 * Role Authorization Middleware
 *
 * This module provides the role gate, composed after authentication on
 * routes restricted to a subset of user roles. It only consults the role
 * already resolved by the authentication gate; no storage access.
 */

use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::users::UserType;
use crate::error::ApiError;
use crate::middleware::auth::AuthenticatedUser;

/// Roles allowed on admin-only routes
pub const ADMIN_ONLY: &[UserType] = &[UserType::Admin];

/// Roles allowed on provider-facing routes
pub const PROVIDER_ONLY: &[UserType] = &[UserType::Provider, UserType::Admin];

/// Whether a role is a member of an allowed set
pub fn role_allowed(role: UserType, allowed: &[UserType]) -> bool {
    allowed.contains(&role)
}

/// Role gate
///
/// Wire it per-route with a closure capturing the allowed set:
///
/// ```rust,ignore
/// use axum::middleware::from_fn;
/// use craftlink::middleware::roles::{require_role, ADMIN_ONLY};
///
/// let gated = get(list_users).layer(from_fn(|request, next| {
///     require_role(ADMIN_ONLY, request, next)
/// }));
/// ```
///
/// # Errors
///
/// * `401 AUTH_REQUIRED` - no authenticated identity on the request
///   (the gate was composed without authentication running first)
/// * `403 PERMISSION_DENIED` - role not in the allowed set
pub async fn require_role(
    allowed: &'static [UserType],
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .ok_or(ApiError::AuthRequired)?;

    if !role_allowed(user.role, allowed) {
        tracing::warn!(
            user_id = %user.user_id,
            role = ?user.role,
            "Role not allowed for this route"
        );
        return Err(ApiError::PermissionDenied);
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_only_membership() {
        assert!(role_allowed(UserType::Admin, ADMIN_ONLY));
        assert!(!role_allowed(UserType::Customer, ADMIN_ONLY));
        assert!(!role_allowed(UserType::Provider, ADMIN_ONLY));
    }

    #[test]
    fn test_provider_routes_admit_admins() {
        assert!(role_allowed(UserType::Provider, PROVIDER_ONLY));
        assert!(role_allowed(UserType::Admin, PROVIDER_ONLY));
        assert!(!role_allowed(UserType::Customer, PROVIDER_ONLY));
    }
}
