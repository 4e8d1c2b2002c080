//! Middleware for protecting authenticated routes and handling
//! authorization
//!
//! - **`auth`**  - global authentication gate, token extraction, and the
//!   narrow active-account gate
//! - **`roles`** - role gate composed after authentication

/// Authentication gate and token extraction
pub mod auth;

/// Role authorization gate
pub mod roles;

// Re-export commonly used items
pub use auth::{auth_guard, require_active_user, AuthUser, AuthenticatedUser};
pub use roles::{require_role, ADMIN_ONLY, PROVIDER_ONLY};
