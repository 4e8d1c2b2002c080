//! Server Module
//!
//! Configuration loading, shared application state, and server
//! initialization.
//!
//! - **`config`** - environment configuration and the bounded connection
//!   pool
//! - **`state`**  - `AppState` and its `FromRef` extractors
//! - **`init`**   - application wiring and background tasks

/// Environment configuration and pool construction
pub mod config;

/// Shared application state
pub mod state;

/// Application wiring
pub mod init;

// Re-export commonly used items
pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;
