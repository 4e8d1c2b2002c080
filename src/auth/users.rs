/**
 * Identity Model and Database Operations
 *
 * This module defines the marketplace identity and its database
 * operations. Every mutation of an identity goes through the account
 * service; handlers only read.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Role of an identity in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    /// Hires providers for services
    Customer,
    /// Offers services
    Provider,
    /// Operates the marketplace
    Admin,
}

/// Identity struct representing a user in the database
///
/// The password hash never leaves the process: it is skipped during
/// serialization, and API responses use `UserResponse` instead.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// User email address (globally unique)
    pub email: String,
    /// Optional contact phone number
    pub phone: Option<String>,
    /// Hashed password (bcrypt)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Role (customer, provider, admin)
    pub user_type: UserType,
    /// Deactivated accounts keep their data but cannot authenticate
    pub is_active: bool,
    /// Whether the email address has been verified
    pub is_verified: bool,
    /// Timestamp of the most recent successful login
    pub last_login: Option<DateTime<Utc>>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to persist a new identity
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub user_type: UserType,
}

/// Create a new identity
///
/// New accounts start active and unverified.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `new_user` - Email, phone, password hash and role
///
/// # Returns
/// Created identity or error
pub async fn create_user(pool: &PgPool, new_user: NewUser) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, phone, password_hash, user_type, is_active, is_verified, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, TRUE, FALSE, $6, $7)
        RETURNING id, email, phone, password_hash, user_type, is_active, is_verified, last_login, created_at, updated_at
        "#
    )
    .bind(id)
    .bind(&new_user.email)
    .bind(&new_user.phone)
    .bind(&new_user.password_hash)
    .bind(new_user.user_type)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get an identity by email
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `email` - User email
///
/// # Returns
/// Identity or None if not found
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, phone, password_hash, user_type, is_active, is_verified, last_login, created_at, updated_at
        FROM users
        WHERE email = $1
        "#
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get an identity by ID
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `id` - User ID
///
/// # Returns
/// Identity or None if not found
pub async fn find_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, phone, password_hash, user_type, is_active, is_verified, last_login, created_at, updated_at
        FROM users
        WHERE id = $1
        "#
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Record a successful login
pub async fn touch_last_login(pool: &PgPool, id: Uuid) -> Result<(), sqlx::Error> {
    let now = Utc::now();

    sqlx::query(
        r#"
        UPDATE users
        SET last_login = $1, updated_at = $1
        WHERE id = $2
        "#,
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(())
}

/// List identities, newest first
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `limit` - Maximum number of rows
/// * `offset` - Rows to skip
pub async fn list_users(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<User>, sqlx::Error> {
    let users = sqlx::query_as::<_, User>(
        r#"
        SELECT id, email, phone, password_hash, user_type, is_active, is_verified, last_login, created_at, updated_at
        FROM users
        ORDER BY created_at DESC
        LIMIT $1 OFFSET $2
        "#
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

/// Build an in-memory identity for unit tests
#[cfg(test)]
pub fn test_user(email: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_string(),
        phone: None,
        password_hash: "$2b$10$abcdefghijklmnopqrstuv".to_string(),
        user_type: UserType::Customer,
        is_active: true,
        is_verified: false,
        last_login: None,
        created_at: now,
        updated_at: now,
    }
}
