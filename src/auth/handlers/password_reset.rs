/**
 * Password Reset Handlers
 *
 * This module implements the two-step password reset flow:
 *
 * - POST /api/auth/forgot-password - request a reset token by email
 * - POST /api/auth/reset-password  - present the token with a new password
 *
 * # Security
 *
 * The request step answers with the same generic message whether or not
 * the email is registered (anti-enumeration). The only observable
 * exception is a delivery failure for a real account, which surfaces as
 * `EMAIL_SEND_FAILED` after the issued token has been rolled back.
 */

use axum::{extract::State, response::Json};

use crate::auth::handlers::types::{ForgotPasswordRequest, MessageResponse, ResetPasswordRequest};
use crate::auth::service;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Generic response for the request step, identical for known and unknown
/// emails
const RESET_REQUESTED: &str =
    "If the email address is registered, a password reset code has been sent";

/// Forgot-password handler (step 1)
///
/// # Errors
///
/// * `500 EMAIL_SEND_FAILED` - the account exists but delivery failed
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(request): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Password reset requested");

    service::request_password_reset(&state.db_pool, state.mailer.as_ref(), &request.email).await?;

    Ok(Json(MessageResponse::ok(RESET_REQUESTED)))
}

/// Reset-password handler (step 2)
///
/// # Errors
///
/// * `400 VALIDATION_ERROR` - password confirmation mismatch
/// * `422 VALIDATION_ERROR` - weak new password
/// * `404 USER_NOT_FOUND` - unknown email
/// * `400 INVALID_OTP` - token unknown, expired, or bound to another
///   identity
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service::confirm_password_reset(
        &state.db_pool,
        &request.token,
        &request.email,
        &request.new_password,
        &request.confirm_password,
    )
    .await?;

    Ok(Json(MessageResponse::ok("Password has been reset successfully")))
}
