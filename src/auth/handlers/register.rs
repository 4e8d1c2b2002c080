/**
 * Registration Handler
 *
 * This module implements the account registration handler for
 * POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email format and password strength
 * 2. Check that the email is not already registered
 * 3. Hash the password and persist the identity (unverified)
 * 4. Return the identity summary with 201 Created
 *
 * # Security
 *
 * The response deliberately carries no tokens: issuance happens at
 * explicit login. Passwords are hashed with bcrypt before storage and
 * never returned in responses.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::auth::service::{self, RegisterInput};
use crate::error::ApiError;

/// Registration handler
///
/// # Errors
///
/// * `422 VALIDATION_ERROR` - malformed email, weak password, or an
///   attempt to self-register as admin
/// * `409 USER_EXISTS` - email already registered
pub async fn register(
    State(pool): State<PgPool>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    tracing::info!(email = %request.email, "Registration request");

    let user = service::register(
        &pool,
        RegisterInput {
            email: request.email,
            phone: request.phone,
            password: request.password,
            user_type: request.user_type,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
