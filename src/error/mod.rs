//! API Error Module
//!
//! This module defines the error taxonomy shared by every handler and
//! middleware layer, and the conversion of those errors into the standard
//! HTTP error envelope.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions, status code and error code mapping
//! - **`conversion`** - Error conversion implementations (IntoResponse)
//!
//! # Error Envelope
//!
//! Every auth-related failure is rendered as:
//!
//! ```json
//! {
//!   "success": false,
//!   "error": {
//!     "code": "INVALID_CREDENTIALS",
//!     "message": "Invalid credentials"
//!   }
//! }
//! ```
//!
//! Server-side failures (database, hashing, signing) are logged with full
//! detail and surfaced to the caller only as a generic `INTERNAL_ERROR`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::ApiError;
