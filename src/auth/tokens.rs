/**
 * Access and Refresh Token Codec
 *
 * This module signs and verifies the stateless JWT credentials used by the
 * API: a short-lived access token for request authentication and a
 * longer-lived refresh token for minting new access tokens without
 * re-authentication.
 *
 * # Design
 *
 * - Two independent HS256 secrets, one per token kind; an access token
 *   never verifies against the refresh secret and vice versa
 * - Fixed TTLs: 1 hour (access), 7 days (refresh)
 * - Verification is total: malformed input, bad signatures and expired
 *   tokens all yield `None`, never an error
 *
 * Tokens are stateless bit strings; the only "state" is validity, a pure
 * function of signature and expiry at verification time.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::{User, UserType};

/// Access token lifetime: 1 hour
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Refresh token lifetime: 7 days
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Fallback access-token secret used when `JWT_ACCESS_SECRET` is unset.
///
/// Kept for parity with the deployed system; see DESIGN.md. A process
/// running on this value is misconfigured and says so in its startup log.
pub const DEFAULT_ACCESS_SECRET: &str = "craftlink-dev-access-secret-change-in-production";

/// Fallback refresh-token secret used when `JWT_REFRESH_SECRET` is unset.
pub const DEFAULT_REFRESH_SECRET: &str = "craftlink-dev-refresh-secret-change-in-production";

/// JWT claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// User role (customer, provider, admin)
    pub role: UserType,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// The token pair issued at login
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing secrets for the two token kinds
#[derive(Debug, Clone)]
pub struct TokenSecrets {
    pub access: String,
    pub refresh: String,
}

impl TokenSecrets {
    /// Load secrets from `JWT_ACCESS_SECRET` / `JWT_REFRESH_SECRET`
    ///
    /// Falls back to the built-in development secrets when a variable is
    /// unset, logging a warning per missing secret.
    pub fn from_env() -> Self {
        let access = std::env::var("JWT_ACCESS_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_ACCESS_SECRET not set, falling back to the built-in development secret"
            );
            DEFAULT_ACCESS_SECRET.to_string()
        });
        let refresh = std::env::var("JWT_REFRESH_SECRET").unwrap_or_else(|_| {
            tracing::warn!(
                "JWT_REFRESH_SECRET not set, falling back to the built-in development secret"
            );
            DEFAULT_REFRESH_SECRET.to_string()
        });
        Self { access, refresh }
    }
}

/// Signs and verifies access/refresh token pairs
#[derive(Clone)]
pub struct TokenCodec {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec with the standard TTLs (1 h access, 7 d refresh)
    pub fn new(secrets: &TokenSecrets) -> Self {
        Self::with_ttls(
            secrets,
            Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            Duration::seconds(REFRESH_TOKEN_TTL_SECS),
        )
    }

    /// Create a codec with explicit TTLs
    ///
    /// Production uses [`TokenCodec::new`]; this exists so expiry behavior
    /// can be exercised deterministically.
    pub fn with_ttls(secrets: &TokenSecrets, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(secrets.access.as_bytes()),
            access_decoding: DecodingKey::from_secret(secrets.access.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(secrets.refresh.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(secrets.refresh.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    /// Issue an access/refresh pair for a user
    pub fn issue_pair(&self, user: &User) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let access_token = self.sign(
            &self.access_encoding,
            &user.id.to_string(),
            &user.email,
            user.user_type,
            now,
            self.access_ttl,
        )?;
        let refresh_token = self.sign(
            &self.refresh_encoding,
            &user.id.to_string(),
            &user.email,
            user.user_type,
            now,
            self.refresh_ttl,
        )?;
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Verify an access token
    ///
    /// Returns `None` on signature mismatch, malformed input, or expiry.
    pub fn verify_access(&self, token: &str) -> Option<Claims> {
        Self::verify(token, &self.access_decoding)
    }

    /// Verify a refresh token
    pub fn verify_refresh(&self, token: &str) -> Option<Claims> {
        Self::verify(token, &self.refresh_decoding)
    }

    /// Mint a fresh access token from a valid refresh token
    ///
    /// The refresh token's identity claims are reused; its timestamps are
    /// discarded and the new access token gets a fresh issued-at/expiry.
    /// Returns `None` if refresh verification fails.
    pub fn rotate_access(&self, refresh_token: &str) -> Option<String> {
        let claims = self.verify_refresh(refresh_token)?;
        // A sub that does not parse back to a UUID means the token was
        // signed for a different system; treat it as invalid.
        Uuid::parse_str(&claims.sub).ok()?;
        self.sign(
            &self.access_encoding,
            &claims.sub,
            &claims.email,
            claims.role,
            Utc::now(),
            self.access_ttl,
        )
        .ok()
    }

    fn sign(
        &self,
        key: &EncodingKey,
        sub: &str,
        email: &str,
        role: UserType,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims {
            sub: sub.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };
        encode(&Header::default(), &claims, key)
    }

    fn verify(token: &str, key: &DecodingKey) -> Option<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<Claims>(token, key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::users::test_user;
    use pretty_assertions::assert_eq;

    fn test_secrets() -> TokenSecrets {
        TokenSecrets {
            access: "unit-test-access-secret".to_string(),
            refresh: "unit-test-refresh-secret".to_string(),
        }
    }

    #[test]
    fn test_access_round_trip() {
        let codec = TokenCodec::new(&test_secrets());
        let user = test_user("codec@example.com");

        let pair = codec.issue_pair(&user).unwrap();
        let claims = codec.verify_access(&pair.access_token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, user.user_type);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_refresh_round_trip() {
        let codec = TokenCodec::new(&test_secrets());
        let user = test_user("codec@example.com");

        let pair = codec.issue_pair(&user).unwrap();
        let claims = codec.verify_refresh(&pair.refresh_token).unwrap();

        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.exp - claims.iat, REFRESH_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_tokens_do_not_cross_verify() {
        let codec = TokenCodec::new(&test_secrets());
        let user = test_user("codec@example.com");
        let pair = codec.issue_pair(&user).unwrap();

        // Each kind is bound to its own secret.
        assert!(codec.verify_refresh(&pair.access_token).is_none());
        assert!(codec.verify_access(&pair.refresh_token).is_none());
    }

    #[test]
    fn test_wrong_secret_fails() {
        let codec = TokenCodec::new(&test_secrets());
        let other = TokenCodec::new(&TokenSecrets {
            access: "a-different-secret".to_string(),
            refresh: "another-different-secret".to_string(),
        });
        let user = test_user("codec@example.com");
        let pair = codec.issue_pair(&user).unwrap();

        assert!(other.verify_access(&pair.access_token).is_none());
        assert!(other.verify_refresh(&pair.refresh_token).is_none());
    }

    #[test]
    fn test_malformed_token_fails() {
        let codec = TokenCodec::new(&test_secrets());
        assert!(codec.verify_access("invalid.token.here").is_none());
        assert!(codec.verify_access("").is_none());
    }

    #[test]
    fn test_expired_token_fails() {
        let secrets = test_secrets();
        let expired = TokenCodec::with_ttls(
            &secrets,
            Duration::seconds(-10),
            Duration::seconds(-10),
        );
        let user = test_user("codec@example.com");
        let pair = expired.issue_pair(&user).unwrap();

        let fresh = TokenCodec::new(&secrets);
        assert!(fresh.verify_access(&pair.access_token).is_none());
        assert!(fresh.verify_refresh(&pair.refresh_token).is_none());
    }

    #[test]
    fn test_rotate_access_from_refresh() {
        let codec = TokenCodec::new(&test_secrets());
        let user = test_user("codec@example.com");
        let pair = codec.issue_pair(&user).unwrap();

        let access = codec.rotate_access(&pair.refresh_token).unwrap();
        let claims = codec.verify_access(&access).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_TTL_SECS);
    }

    #[test]
    fn test_rotate_rejects_access_token() {
        let codec = TokenCodec::new(&test_secrets());
        let user = test_user("codec@example.com");
        let pair = codec.issue_pair(&user).unwrap();

        // An access token is not a refresh credential.
        assert!(codec.rotate_access(&pair.access_token).is_none());
        assert!(codec.rotate_access("garbage").is_none());
    }

    #[test]
    #[serial_test::serial]
    fn test_secrets_fall_back_when_env_unset() {
        std::env::remove_var("JWT_ACCESS_SECRET");
        std::env::remove_var("JWT_REFRESH_SECRET");
        let secrets = TokenSecrets::from_env();
        assert_eq!(secrets.access, DEFAULT_ACCESS_SECRET);
        assert_eq!(secrets.refresh, DEFAULT_REFRESH_SECRET);
    }

    #[test]
    #[serial_test::serial]
    fn test_secrets_read_from_env() {
        std::env::set_var("JWT_ACCESS_SECRET", "env-access");
        std::env::set_var("JWT_REFRESH_SECRET", "env-refresh");
        let secrets = TokenSecrets::from_env();
        assert_eq!(secrets.access, "env-access");
        assert_eq!(secrets.refresh, "env-refresh");
        std::env::remove_var("JWT_ACCESS_SECRET");
        std::env::remove_var("JWT_REFRESH_SECRET");
    }

    #[test]
    fn test_rotate_rejects_expired_refresh() {
        let secrets = test_secrets();
        let expired = TokenCodec::with_ttls(
            &secrets,
            Duration::seconds(ACCESS_TOKEN_TTL_SECS),
            Duration::seconds(-10),
        );
        let user = test_user("codec@example.com");
        let pair = expired.issue_pair(&user).unwrap();

        assert!(expired.rotate_access(&pair.refresh_token).is_none());
    }
}
