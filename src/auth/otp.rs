/**
 * One-Time Token Store
 *
 * This module issues, looks up, and sweeps the single-use tokens that
 * authorize out-of-band actions: email verification (24 hour lifetime)
 * and password reset (1 hour lifetime).
 *
 * # Invariants
 *
 * - At most one live token per (user, purpose): issuing a new token
 *   deletes every prior token of the same purpose for that user, in the
 *   same transaction as the insert
 * - A token at exactly its expiry instant is still valid; expiry triggers
 *   strictly after (`now > expires_at`)
 * - `consume` never deletes a valid token. The caller deletes it inside
 *   the same transaction as the state change it authorizes, so the token
 *   disappears if and only if that change commits
 *
 * Token values carry 32 bytes of CSPRNG entropy, hex-encoded.
 */

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// Which one-time action a token authorizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "token_purpose", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TokenPurpose {
    EmailVerification,
    PasswordReset,
}

/// A stored one-time token row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OtpRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub purpose: TokenPurpose,
    pub token_value: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Failure modes of consuming a one-time token
///
/// The `Invalid` and `Expired` messages are part of the API contract.
#[derive(Debug, Error)]
pub enum OtpError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token expired")]
    Expired,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Issues and consumes one-time tokens of a single purpose
///
/// Two instances exist, differing only in purpose and lifetime; see
/// [`OtpStore::email_verification`] and [`OtpStore::password_reset`].
#[derive(Debug, Clone, Copy)]
pub struct OtpStore {
    purpose: TokenPurpose,
    ttl: Duration,
}

impl OtpStore {
    /// Store for email verification tokens (24 hour lifetime)
    pub fn email_verification() -> Self {
        Self {
            purpose: TokenPurpose::EmailVerification,
            ttl: Duration::hours(24),
        }
    }

    /// Store for password reset tokens (1 hour lifetime)
    pub fn password_reset() -> Self {
        Self {
            purpose: TokenPurpose::PasswordReset,
            ttl: Duration::hours(1),
        }
    }

    pub fn purpose(&self) -> TokenPurpose {
        self.purpose
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a fresh token for a user
    ///
    /// Deletes every prior token of this purpose for the user and inserts
    /// the replacement in one transaction, keeping the at-most-one-live
    /// invariant even under concurrent issuance.
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `user_id` - Identity the token is bound to
    /// * `now` - Issue timestamp; expiry is `now + ttl`
    pub async fn issue(
        &self,
        pool: &PgPool,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<OtpRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM one_time_tokens
            WHERE user_id = $1 AND purpose = $2
            "#,
        )
        .bind(user_id)
        .bind(self.purpose)
        .execute(&mut *tx)
        .await?;

        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            INSERT INTO one_time_tokens (id, user_id, purpose, token_value, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, purpose, token_value, expires_at, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(self.purpose)
        .bind(generate_token_value())
        .bind(now + self.ttl)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            user_id = %user_id,
            purpose = ?self.purpose,
            "Issued one-time token"
        );

        Ok(record)
    }

    /// Look up a token by its exact value
    ///
    /// - Unknown value: `OtpError::Invalid`
    /// - Expired: the row is deleted and `OtpError::Expired` is returned
    /// - Valid: the record is returned WITHOUT deletion; the caller must
    ///   delete it in the same transaction as the state change it gates
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `token_value` - The presented token value
    /// * `now` - Timestamp to evaluate expiry against
    pub async fn consume(
        &self,
        pool: &PgPool,
        token_value: &str,
        now: DateTime<Utc>,
    ) -> Result<OtpRecord, OtpError> {
        let record = sqlx::query_as::<_, OtpRecord>(
            r#"
            SELECT id, user_id, purpose, token_value, expires_at, created_at
            FROM one_time_tokens
            WHERE token_value = $1 AND purpose = $2
            "#,
        )
        .bind(token_value)
        .bind(self.purpose)
        .fetch_optional(pool)
        .await?
        .ok_or(OtpError::Invalid)?;

        if is_expired(record.expires_at, now) {
            sqlx::query("DELETE FROM one_time_tokens WHERE id = $1")
                .bind(record.id)
                .execute(pool)
                .await?;
            tracing::debug!(
                user_id = %record.user_id,
                purpose = ?self.purpose,
                "Deleted expired one-time token on consume"
            );
            return Err(OtpError::Expired);
        }

        Ok(record)
    }
}

/// Delete every expired token of both purposes
///
/// Invoked periodically by the background task spawned at server init;
/// the store never schedules itself.
///
/// # Returns
/// Number of rows deleted
pub async fn sweep_expired(pool: &PgPool, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM one_time_tokens WHERE expires_at < $1")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Generate a token value with 32 bytes of CSPRNG entropy, hex-encoded
pub fn generate_token_value() -> String {
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Expiry predicate: a token at exactly `expires_at` is still valid
fn is_expired(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    now > expires_at
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_value_is_64_hex_chars() {
        let value = generate_token_value();
        assert_eq!(value.len(), 64);
        assert!(value.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_token_values_are_unique() {
        let first = generate_token_value();
        let second = generate_token_value();
        assert_ne!(first, second);
    }

    #[test]
    fn test_expiry_boundary_equality_is_valid() {
        let at = Utc::now();
        assert!(!is_expired(at, at));
    }

    #[test]
    fn test_expiry_strictly_after() {
        let at = Utc::now();
        assert!(is_expired(at, at + Duration::seconds(1)));
        assert!(!is_expired(at, at - Duration::seconds(1)));
    }

    #[test]
    fn test_variant_lifetimes() {
        assert_eq!(OtpStore::email_verification().ttl(), Duration::hours(24));
        assert_eq!(OtpStore::password_reset().ttl(), Duration::hours(1));
    }

    #[test]
    fn test_variant_purposes() {
        assert_eq!(
            OtpStore::email_verification().purpose(),
            TokenPurpose::EmailVerification
        );
        assert_eq!(
            OtpStore::password_reset().purpose(),
            TokenPurpose::PasswordReset
        );
    }

    #[test]
    fn test_otp_error_messages_are_contractual() {
        assert_eq!(OtpError::Invalid.to_string(), "Invalid token");
        assert_eq!(OtpError::Expired.to_string(), "Token expired");
    }
}
