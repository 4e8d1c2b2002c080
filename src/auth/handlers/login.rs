/**
 * Login Handler
 *
 * This module implements the authentication handler for
 * POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up the identity by email
 * 2. Verify the password with bcrypt
 * 3. Check the account is active
 * 4. Record the login and issue the access/refresh pair
 *
 * # Security
 *
 * Unknown email and wrong password produce the identical
 * `INVALID_CREDENTIALS` response, so callers cannot enumerate accounts.
 * An unverified email does not block login; a deactivated account does.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::service;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 INVALID_CREDENTIALS` - unknown email or wrong password
/// * `403 ACCOUNT_DISABLED` - account deactivated
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!(email = %request.email, "Login request");

    let (user, tokens) =
        service::login(&state.db_pool, &state.tokens, &request.email, &request.password).await?;

    Ok(Json(AuthResponse {
        user: UserResponse::from(user),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}
