//! Craftlink backend
//!
//! Service-marketplace backend whose engineering core is the
//! authentication and credential-lifecycle subsystem: password hashing,
//! JWT issuance and verification, one-time tokens for email verification
//! and password reset, and the request gates enforcing them.
//!
//! # Modules
//!
//! - **`auth`**       - credential lifecycle: hasher, token codec,
//!   one-time tokens, identity storage, account service, handlers
//! - **`middleware`** - authentication, active-account and role gates
//! - **`api`**        - user resource handlers
//! - **`email`**      - notification collaborator (token delivery)
//! - **`error`**      - error taxonomy and the HTTP error envelope
//! - **`routes`**     - route table and router assembly
//! - **`server`**     - configuration, shared state, initialization

/// User resource handlers
pub mod api;

/// Authentication and credential lifecycle
pub mod auth;

/// Token delivery (notification collaborator)
pub mod email;

/// Error taxonomy and HTTP envelope
pub mod error;

/// Request gates
pub mod middleware;

/// Route configuration
pub mod routes;

/// Server configuration and wiring
pub mod server;
