//! Route Configuration Module
//!
//! - **`router`**     - final router assembly and global middleware
//! - **`api_routes`** - API route table and per-route gates

/// Router assembly
pub mod router;

/// API route table
pub mod api_routes;

// Re-export commonly used items
pub use router::create_router;
