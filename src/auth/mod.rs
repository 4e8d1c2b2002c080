//! Authentication Module
//!
//! This module owns the credential lifecycle of the marketplace: password
//! hashing, JWT issuance and verification, one-time tokens for email
//! verification and password reset, and the account flows composing them.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`hasher`**   - Password hashing and strength validation
//! - **`tokens`**   - Access/refresh JWT codec
//! - **`otp`**      - One-time token store (verification, reset)
//! - **`users`**    - Identity model and database operations
//! - **`service`**  - Account flow orchestration
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── hasher.rs       - bcrypt hashing + password policy
//! ├── tokens.rs       - JWT codec (access + refresh)
//! ├── otp.rs          - One-time token store
//! ├── users.rs        - Identity model and queries
//! ├── service.rs      - Account service orchestration
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs
//!     ├── types.rs
//!     ├── register.rs
//!     ├── login.rs
//!     ├── refresh.rs
//!     ├── password_reset.rs
//!     ├── verification.rs
//!     └── me.rs
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: email + password -> identity persisted unverified, no
//!    tokens issued
//! 2. **Login**: credentials verified -> access (1 h) + refresh (7 d) pair
//! 3. **Refresh**: refresh token -> fresh access token
//! 4. **Verify / Reset**: one-time token delivered by email authorizes a
//!    single state change, consumed atomically with it
//!
//! # Security
//!
//! - Passwords are hashed with bcrypt (cost 10) before storage
//! - Access and refresh tokens are signed with distinct secrets
//! - Login failures never reveal whether the email exists
//! - One-time tokens carry 32 bytes of CSPRNG entropy and are single-use

/// Password hashing and strength validation
pub mod hasher;

/// Access/refresh JWT codec
pub mod tokens;

/// One-time token store
pub mod otp;

/// Identity model and database operations
pub mod users;

/// Account flow orchestration
pub mod service;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{
    forgot_password, get_me, login, refresh_token, register, resend_verification, reset_password,
    verify_email,
};
pub use tokens::{TokenCodec, TokenSecrets};
pub use users::{User, UserType};
