/**
 * Email Verification Handlers
 *
 * This module implements the email verification flow:
 *
 * - POST /api/auth/resend-verification - (re-)request a verification token
 * - POST /api/auth/verify-email        - present the token
 *
 * The request step is anti-enumeration like forgot-password. There is no
 * rate limit on re-requests; each one replaces the previous token.
 */

use axum::{extract::State, response::Json};
use sqlx::PgPool;

use crate::auth::handlers::types::{
    MessageResponse, ResendVerificationRequest, VerifyEmailRequest,
};
use crate::auth::service;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Generic response for the request step, identical for known and unknown
/// emails
const VERIFICATION_REQUESTED: &str =
    "If the email address is registered, a verification code has been sent";

/// Resend-verification handler
///
/// # Errors
///
/// * `400 ALREADY_VERIFIED` - the account is already verified
/// * `500 EMAIL_SEND_FAILED` - delivery failed; the token was rolled back
pub async fn resend_verification(
    State(state): State<AppState>,
    Json(request): Json<ResendVerificationRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    tracing::info!("Verification email requested");

    service::request_email_verification(&state.db_pool, state.mailer.as_ref(), &request.email)
        .await?;

    Ok(Json(MessageResponse::ok(VERIFICATION_REQUESTED)))
}

/// Verify-email handler
///
/// # Errors
///
/// * `400 INVALID_OTP` - token unknown or expired
/// * `400 ALREADY_VERIFIED` - identity already verified (the token is
///   still consumed)
pub async fn verify_email(
    State(pool): State<PgPool>,
    Json(request): Json<VerifyEmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    service::confirm_email_verification(&pool, &request.token).await?;

    Ok(Json(MessageResponse::ok("Email verified successfully")))
}
