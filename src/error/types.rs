/**
 * API Error Types
 *
 * This module defines the error taxonomy used across the authentication
 * subsystem and the resource handlers. Each variant maps to a stable
 * machine-readable error code and an HTTP status.
 *
 * # Error Categories
 *
 * ## Client errors
 *
 * Validation failures, missing or invalid credentials, duplicate accounts,
 * and one-time-token failures. These carry messages that are safe to show
 * to callers.
 *
 * ## Server errors
 *
 * Database, hashing, and token-signing failures. These are logged with
 * full detail at the conversion boundary and surfaced only as a generic
 * internal error.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors produced by the authentication subsystem and resource handlers.
///
/// Every variant has a stable error code (see [`ApiError::code`]) and an
/// HTTP status (see [`ApiError::status_code`]). Handlers return `ApiError`
/// directly; the `IntoResponse` implementation in `conversion` renders the
/// standard error envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation (weak password, malformed email, ...)
    #[error("{message}")]
    Validation { message: String },

    /// Malformed request that is not a field-validation failure
    /// (e.g. password confirmation mismatch)
    #[error("{message}")]
    BadRequest { message: String },

    /// No bearer credential was presented
    #[error("Token missing")]
    AuthRequired,

    /// A credential was presented but failed signature or expiry checks
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Login failed; identical for unknown email and wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The account exists but has been deactivated
    #[error("Account is disabled")]
    AccountDisabled,

    /// The resolved identity's role is not allowed for this route
    #[error("Permission denied")]
    PermissionDenied,

    /// Lookup by a caller-supplied key found no identity
    #[error("User not found")]
    UserNotFound,

    /// A cryptographically valid token references an identity that is
    /// missing or deactivated in storage
    #[error("User not found")]
    IdentityRevoked,

    /// Registration against an email that is already taken
    #[error("Email is already registered")]
    UserExists,

    /// One-time token is unknown, expired, or bound to another identity
    #[error("{message}")]
    InvalidOtp { message: String },

    /// Email verification requested or confirmed for an already verified
    /// account
    #[error("Email is already verified")]
    AlreadyVerified,

    /// The notification collaborator reported a delivery failure
    #[error("Failed to send email")]
    EmailSendFailed,

    /// Storage failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Token signing failure
    #[error("Token signing error: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// Catch-all for unexpected conditions
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<crate::auth::otp::OtpError> for ApiError {
    fn from(err: crate::auth::otp::OtpError) -> Self {
        use crate::auth::otp::OtpError;
        match err {
            OtpError::Invalid | OtpError::Expired => Self::InvalidOtp {
                message: err.to_string(),
            },
            OtpError::Database(e) => Self::Database(e),
        }
    }
}

impl ApiError {
    /// Create a validation error (422)
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a bad-request error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create an internal error (500)
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::AuthRequired => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountDisabled => StatusCode::FORBIDDEN,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::UserNotFound => StatusCode::NOT_FOUND,
            Self::IdentityRevoked => StatusCode::UNAUTHORIZED,
            Self::UserExists => StatusCode::CONFLICT,
            Self::InvalidOtp { .. } => StatusCode::BAD_REQUEST,
            Self::AlreadyVerified => StatusCode::BAD_REQUEST,
            Self::EmailSendFailed => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database(_) | Self::Hash(_) | Self::Signing(_) | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the machine-readable error code for this error
    ///
    /// Codes are part of the API contract and must stay stable.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } | Self::BadRequest { .. } => "VALIDATION_ERROR",
            Self::AuthRequired => "AUTH_REQUIRED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::PermissionDenied => "PERMISSION_DENIED",
            Self::UserNotFound | Self::IdentityRevoked => "USER_NOT_FOUND",
            Self::UserExists => "USER_EXISTS",
            Self::InvalidOtp { .. } => "INVALID_OTP",
            Self::AlreadyVerified => "ALREADY_VERIFIED",
            Self::EmailSendFailed => "EMAIL_SEND_FAILED",
            Self::Database(_) | Self::Hash(_) | Self::Signing(_) | Self::Internal { .. } => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Get the message that is safe to surface to the caller
    ///
    /// Server errors collapse to a generic message; their detail only goes
    /// to the server-side log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(_) | Self::Hash(_) | Self::Signing(_) | Self::Internal { .. } => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::validation("weak").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::bad_request("mismatch").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::AuthRequired.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::InvalidToken.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::AccountDisabled.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::PermissionDenied.status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(ApiError::UserNotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::IdentityRevoked.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::UserExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::AlreadyVerified.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::EmailSendFailed.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::AuthRequired.code(), "AUTH_REQUIRED");
        assert_eq!(ApiError::InvalidToken.code(), "INVALID_TOKEN");
        assert_eq!(ApiError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(ApiError::AccountDisabled.code(), "ACCOUNT_DISABLED");
        assert_eq!(ApiError::PermissionDenied.code(), "PERMISSION_DENIED");
        assert_eq!(ApiError::UserExists.code(), "USER_EXISTS");
        assert_eq!(ApiError::AlreadyVerified.code(), "ALREADY_VERIFIED");
        assert_eq!(ApiError::EmailSendFailed.code(), "EMAIL_SEND_FAILED");
        assert_eq!(ApiError::internal("boom").code(), "INTERNAL_ERROR");
        // Both lookup misses and revoked identities share the same code,
        // differing only in status.
        assert_eq!(ApiError::UserNotFound.code(), "USER_NOT_FOUND");
        assert_eq!(ApiError::IdentityRevoked.code(), "USER_NOT_FOUND");
    }

    #[test]
    fn test_public_message_hides_server_detail() {
        let err = ApiError::internal("connection pool exhausted on node 3");
        assert_eq!(err.public_message(), "Internal server error");

        let err = ApiError::InvalidCredentials;
        assert_eq!(err.public_message(), "Invalid credentials");
    }

    #[test]
    fn test_auth_required_message() {
        assert_eq!(ApiError::AuthRequired.to_string(), "Token missing");
    }

    #[test]
    fn test_otp_error_conversion() {
        use crate::auth::otp::OtpError;

        let err: ApiError = OtpError::Invalid.into();
        assert_eq!(err.code(), "INVALID_OTP");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Invalid token");

        let err: ApiError = OtpError::Expired.into();
        assert_eq!(err.code(), "INVALID_OTP");
        assert_eq!(err.public_message(), "Token expired");
    }
}
