/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container, built once at startup and
 * cloned into every handler:
 *
 * - The bounded PostgreSQL connection pool (the only cross-request shared
 *   resource)
 * - The token codec (keys loaded once, cheap to clone)
 * - The mailer (trait object; SMTP or log-only depending on config)
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract just the part of the
 * state they need (`State<PgPool>`, `State<TokenCodec>`) without taking
 * the whole `AppState`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::auth::tokens::TokenCodec;
use crate::email::Mailer;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    /// Bounded PostgreSQL connection pool
    pub db_pool: PgPool,

    /// Access/refresh token codec
    pub tokens: TokenCodec,

    /// Notification collaborator for token delivery
    pub mailer: Arc<dyn Mailer>,
}

/// Allow handlers to extract the pool directly
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

/// Allow handlers to extract the token codec directly
impl FromRef<AppState> for TokenCodec {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

/// Allow handlers to extract the mailer directly
impl FromRef<AppState> for Arc<dyn Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}
