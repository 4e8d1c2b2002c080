/**
 * Token Refresh Handler
 *
 * This module implements the handler for POST /api/auth/refresh-token,
 * which exchanges a valid refresh token for a fresh access token without
 * re-authentication.
 *
 * The route is allow-listed: an expired access token must not block
 * refreshing, which is the whole point of the operation.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{RefreshTokenRequest, RefreshTokenResponse};
use crate::auth::service;
use crate::auth::tokens::TokenCodec;
use crate::error::ApiError;

/// Refresh handler
///
/// # Errors
///
/// * `401 INVALID_TOKEN` - refresh token failed signature or expiry checks
pub async fn refresh_token(
    State(codec): State<TokenCodec>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ApiError> {
    let access_token = service::refresh_access(&codec, &request.refresh_token)?;
    Ok(Json(RefreshTokenResponse { access_token }))
}
