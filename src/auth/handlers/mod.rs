//! HTTP handlers for the authentication endpoints
//!
//! Handlers stay thin: request parsing and response shaping here, flow
//! logic in `auth::service`.

/// Request/response types
pub mod types;

/// Account registration handler
pub mod register;

/// User authentication handler
pub mod login;

/// Access token refresh handler
pub mod refresh;

/// Password reset flow handlers
pub mod password_reset;

/// Email verification flow handlers
pub mod verification;

/// Current user handler
pub mod me;

// Re-export commonly used handlers and types
pub use login::login;
pub use me::get_me;
pub use password_reset::{forgot_password, reset_password};
pub use refresh::refresh_token;
pub use register::register;
pub use types::{AuthResponse, MessageResponse, UserResponse};
pub use verification::{resend_verification, verify_email};
