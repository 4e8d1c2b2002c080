/**
 * API Route Handlers
 *
 * This module wires the API endpoints to their handlers and composes the
 * per-route gates.
 *
 * # Routes
 *
 * ## Authentication (public, allow-listed in the global gate)
 * - `POST /api/auth/register`            - account registration
 * - `POST /api/auth/login`               - login, returns the token pair
 * - `POST /api/auth/refresh-token`       - mint a fresh access token
 * - `POST /api/auth/forgot-password`     - request a password reset token
 * - `POST /api/auth/reset-password`      - confirm a password reset
 * - `POST /api/auth/resend-verification` - request a verification token
 * - `POST /api/auth/verify-email`        - confirm email verification
 *
 * ## Protected
 * - `GET /api/auth/me`     - current identity (live-account check in the
 *   handler)
 * - `GET /api/users/me`    - profile, behind the active-account gate
 * - `GET /api/admin/users` - identity listing, behind the active-account
 *   gate and the admin role gate
 */

use axum::extract::Request;
use axum::middleware::{from_fn, from_fn_with_state, Next};
use axum::routing::{get, post};
use axum::Router;

use crate::api::users::{get_profile, list_all_users};
use crate::auth::handlers::{
    forgot_password, get_me, login, refresh_token, register, resend_verification, reset_password,
    verify_email,
};
use crate::middleware::auth::require_active_user;
use crate::middleware::roles::{require_role, ADMIN_ONLY};
use crate::server::state::AppState;

/// Configure API routes
///
/// The global authentication gate is layered in `router::create_router`;
/// this function only adds the per-route gates (active account, role).
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let active_gate = from_fn_with_state(state.db_pool.clone(), require_active_user);

    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/refresh-token", post(refresh_token))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route("/api/auth/reset-password", post(reset_password))
        .route("/api/auth/resend-verification", post(resend_verification))
        .route("/api/auth/verify-email", post(verify_email))
        .route("/api/auth/me", get(get_me))
        // User resources behind the active-account gate
        .route("/api/users/me", get(get_profile).layer(active_gate.clone()))
        .route(
            "/api/admin/users",
            get(list_all_users)
                .layer(from_fn(|request: Request, next: Next| {
                    require_role(ADMIN_ONLY, request, next)
                }))
                .layer(active_gate),
        )
}
