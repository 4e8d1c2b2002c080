/**
 * Error Conversion
 *
 * This module converts `ApiError` values into HTTP responses carrying the
 * standard error envelope.
 *
 * # Response Format
 *
 * ```json
 * {
 *   "success": false,
 *   "error": {
 *     "code": "AUTH_REQUIRED",
 *     "message": "Token missing"
 *   }
 * }
 * ```
 *
 * # Cookie Clearing
 *
 * `INVALID_TOKEN` responses additionally instruct the client to drop any
 * stored `token` and `accessToken` cookies, so a browser holding a stale
 * credential does not keep replaying it.
 */

use axum::{
    body::Body,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
};

use crate::error::types::ApiError;

/// `Set-Cookie` values that expire the cookies a client may have stored.
const CLEARED_COOKIES: [&str; 2] = [
    "token=; Path=/; HttpOnly; Max-Age=0",
    "accessToken=; Path=/; HttpOnly; Max-Age=0",
];

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server-side failures keep their detail out of the response body;
        // the log line is the only place it appears.
        if status.is_server_error() {
            tracing::error!("request failed: {self:?}");
        }

        let body = serde_json::json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.public_message(),
            },
        });

        let mut builder = Response::builder()
            .status(status)
            .header("Content-Type", "application/json");

        if matches!(self, ApiError::InvalidToken) {
            for cookie in CLEARED_COOKIES {
                builder = builder.header(SET_COOKIE, cookie);
            }
        }

        builder
            .body(Body::from(body.to_string()))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}
