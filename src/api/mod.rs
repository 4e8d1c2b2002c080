//! Resource API handlers
//!
//! Handlers for resources outside the authentication flows. Category and
//! service CRUD live with their own teams; this module carries the user
//! resources that exercise the account gates.

/// User resource handlers
pub mod users;
