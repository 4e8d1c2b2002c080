/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication handlers. These types are shared across the register,
 * login, refresh, password-reset and verification handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::{User, UserType};

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Account email address (globally unique)
    pub email: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Plaintext password (hashed before storage)
    pub password: String,
    /// Requested role; defaults to customer, admin is rejected
    #[serde(default)]
    pub user_type: Option<UserType>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    /// Verified against the stored hash
    pub password: String,
}

/// Refresh request carrying the long-lived refresh token
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response to a successful refresh
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
}

/// Password reset request (step 1)
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Password reset confirmation (step 2)
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub email: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Verification re-request
#[derive(Debug, Deserialize)]
pub struct ResendVerificationRequest {
    pub email: String,
}

/// Verification confirmation
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

/// Identity summary safe to return to clients
///
/// Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub user_type: UserType,
    pub is_active: bool,
    pub is_verified: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            phone: user.phone,
            user_type: user.user_type,
            is_active: user.is_active,
            is_verified: user.is_verified,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

/// Response to a successful login: identity summary plus the token pair
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    /// Short-lived credential for API calls (1 hour)
    pub access_token: String,
    /// Long-lived credential for minting access tokens (7 days)
    pub refresh_token: String,
}

/// Generic success envelope for message-only responses
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::test_user;

    #[test]
    fn test_user_response_omits_password_hash() {
        let response = UserResponse::from(test_user("shape@example.com"));
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "shape@example.com");
        assert_eq!(json["is_verified"], false);
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::ok("done")).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "done");
    }

    #[test]
    fn test_register_request_defaults_role() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"email":"a@x.com","password":"Abcdef1!"}"#).unwrap();
        assert_eq!(request.user_type, None);
        assert_eq!(request.phone, None);
    }
}
