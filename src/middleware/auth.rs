/**
 * Authentication Middleware
 *
 * This module provides the global request gate. Every inbound request
 * except the allow-listed public routes must carry a valid access token,
 * presented either as a `token` cookie or as an `Authorization: Bearer`
 * header (the cookie wins when both are present).
 *
 * On success the resolved identity is attached to the request extensions
 * for downstream handlers; the gate itself keeps no state between
 * requests.
 *
 * A second, narrower gate (`require_active_user`) re-resolves the
 * identity against current storage so that a valid token for a deleted or
 * deactivated account is still rejected.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::tokens::TokenCodec;
use crate::auth::users::{find_user_by_id, UserType};
use crate::error::ApiError;

/// Route prefixes that bypass the gate entirely
pub const PUBLIC_ROUTE_PREFIXES: &[&str] = &[
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/refresh-token",
    "/api/auth/forgot-password",
    "/api/auth/reset-password",
    "/api/auth/verify-email",
    "/api/auth/resend-verification",
    "/health",
];

/// Whether a path is allow-listed
pub fn is_public_route(path: &str) -> bool {
    PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Authenticated identity extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserType,
}

/// Global authentication gate
///
/// This middleware:
/// 1. Passes allow-listed routes through unmodified
/// 2. Extracts the access token (cookie first, then bearer header)
/// 3. Verifies it against the codec
/// 4. Attaches the resolved identity to the request extensions
///
/// # Errors
///
/// * `401 AUTH_REQUIRED` - no token in either place
/// * `401 INVALID_TOKEN` - signature or expiry failure; the response also
///   instructs the client to drop its stored token cookies
pub async fn auth_guard(
    State(codec): State<TokenCodec>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if is_public_route(request.uri().path()) {
        return Ok(next.run(request).await);
    }

    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!(path = %request.uri().path(), "Request without bearer credential");
        ApiError::AuthRequired
    })?;

    let claims = codec.verify_access(&token).ok_or_else(|| {
        tracing::warn!(path = %request.uri().path(), "Invalid access token");
        ApiError::InvalidToken
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Access token with non-UUID subject: {e}");
        ApiError::InvalidToken
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Narrow gate: reject tokens for missing or deactivated accounts
///
/// Composes after `auth_guard` on routes that must not serve revoked
/// identities. The extra storage round-trip is the price of reconciling
/// stateless tokens with deactivatable accounts.
///
/// # Errors
///
/// * `401 USER_NOT_FOUND` - identity missing or `is_active = false`
pub async fn require_active_user(
    State(pool): State<PgPool>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or(ApiError::AuthRequired)?;

    match find_user_by_id(&pool, user.user_id).await? {
        Some(current) if current.is_active => Ok(next.run(request).await),
        _ => {
            tracing::warn!(user_id = %user.user_id, "Valid token for missing or disabled account");
            Err(ApiError::IdentityRevoked)
        }
    }
}

/// Extract the access token from request headers
///
/// The `token` cookie takes precedence; the `Authorization: Bearer`
/// header is the fallback.
pub fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = cookie_value(headers, "token") {
        return Some(token);
    }
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Read a cookie value out of the `Cookie` header(s)
fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header in headers.get_all(COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        for pair in raw.split(';') {
            let mut parts = pair.trim().splitn(2, '=');
            if parts.next() == Some(name) {
                match parts.next() {
                    Some(value) if !value.is_empty() => return Some(value.to_string()),
                    _ => {}
                }
            }
        }
    }
    None
}

/// Axum extractor for the authenticated identity
///
/// Handlers behind the gate take `AuthUser(user)` as a parameter instead
/// of reading the extensions by hand.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                ApiError::AuthRequired
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_public_routes_are_allow_listed() {
        assert!(is_public_route("/api/auth/login"));
        assert!(is_public_route("/api/auth/register"));
        assert!(is_public_route("/api/auth/forgot-password"));
        assert!(is_public_route("/api/auth/reset-password"));
        assert!(is_public_route("/api/auth/verify-email"));
        assert!(is_public_route("/api/auth/resend-verification"));
        assert!(is_public_route("/api/auth/refresh-token"));
        assert!(is_public_route("/health"));
    }

    #[test]
    fn test_protected_routes_are_not_allow_listed() {
        assert!(!is_public_route("/api/auth/me"));
        assert!(!is_public_route("/api/users/me"));
        assert!(!is_public_route("/api/admin/users"));
        assert!(!is_public_route("/"));
    }

    #[test]
    fn test_extract_token_from_cookie() {
        let headers = headers(&[("cookie", "theme=dark; token=abc123; lang=en")]);
        assert_eq!(extract_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_extract_token_from_bearer_header() {
        let headers = headers(&[("authorization", "Bearer xyz789")]);
        assert_eq!(extract_token(&headers).as_deref(), Some("xyz789"));
    }

    #[test]
    fn test_cookie_takes_precedence_over_header() {
        let headers = headers(&[
            ("cookie", "token=from-cookie"),
            ("authorization", "Bearer from-header"),
        ]);
        assert_eq!(extract_token(&headers).as_deref(), Some("from-cookie"));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let headers = headers(&[("cookie", "token="), ("authorization", "Bearer fallback")]);
        assert_eq!(extract_token(&headers).as_deref(), Some("fallback"));
    }

    #[test]
    fn test_no_token_anywhere() {
        let headers = headers(&[("cookie", "theme=dark")]);
        assert_eq!(extract_token(&headers), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_malformed_authorization_scheme_is_ignored() {
        let headers = headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
        assert_eq!(extract_token(&headers), None);
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let headers = headers(&[("cookie", "accessToken=not-this-one")]);
        assert_eq!(extract_token(&headers), None);
    }
}
