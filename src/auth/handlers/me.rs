/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * the identity behind the presented access token.
 *
 * # Authentication
 *
 * The global gate has already verified the token and attached the
 * resolved identity to the request. This handler additionally re-resolves
 * the identity against current storage: a cryptographically valid token
 * for an account that has since been deleted or deactivated is rejected
 * with 401 `USER_NOT_FOUND`. This reconciles the stateless-token model
 * with revocable accounts.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::find_user_by_id;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// Current-user handler
///
/// # Errors
///
/// * `401 USER_NOT_FOUND` - identity missing or deactivated despite a
///   valid token
pub async fn get_me(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = match find_user_by_id(&pool, user.user_id).await? {
        Some(user) if user.is_active => user,
        _ => {
            tracing::warn!(user_id = %user.user_id, "Valid token for missing or disabled account");
            return Err(ApiError::IdentityRevoked);
        }
    };

    Ok(Json(UserResponse::from(user)))
}
