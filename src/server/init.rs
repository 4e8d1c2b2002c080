/**
 * Server Initialization
 *
 * This module wires the application together: configuration, connection
 * pool, token codec, mailer, router, and the periodic one-time-token
 * sweeper.
 *
 * # Initialization Steps
 *
 * 1. Build the bounded connection pool and run migrations (fatal on
 *    failure)
 * 2. Load signing secrets and construct the token codec
 * 3. Pick the mailer: SMTP when configured, the log-only fallback
 *    otherwise
 * 4. Create the router with the authentication gate layered on
 * 5. Spawn the hourly sweeper that deletes expired one-time tokens
 */

use std::sync::Arc;

use axum::Router;

use crate::auth::service::sweep_expired_tokens;
use crate::auth::tokens::{TokenCodec, TokenSecrets};
use crate::email::{LogMailer, Mailer, SmtpConfig, SmtpMailer};
use crate::routes::router::create_router;
use crate::server::config::{load_database, AppConfig};
use crate::server::state::AppState;

/// Interval between sweeps of expired one-time tokens
const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60 * 60);

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the database is unreachable, migrations fail, or a
/// configured SMTP transport cannot be built.
pub async fn create_app(config: &AppConfig) -> Result<Router, Box<dyn std::error::Error>> {
    tracing::info!("Initializing Craftlink backend server");

    // Step 1: storage. Fatal if absent; the auth core is storage-backed.
    let db_pool = load_database(config).await?;

    // Step 2: token codec. Secrets fall back to development defaults with
    // a warning; see DESIGN.md.
    let secrets = TokenSecrets::from_env();
    let tokens = TokenCodec::new(&secrets);

    // Step 3: mailer.
    let mailer: Arc<dyn Mailer> = match SmtpConfig::from_env() {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, "Using SMTP mailer");
            Arc::new(SmtpMailer::new(&smtp)?)
        }
        None => {
            tracing::warn!("SMTP not configured; token emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    let state = AppState {
        db_pool: db_pool.clone(),
        tokens,
        mailer,
    };

    // Step 4: router with the gate layered on.
    let app = create_router(state);

    // Step 5: periodic sweeper for expired one-time tokens. The store
    // itself never self-schedules; this task is its external scheduler.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            if let Err(e) = sweep_expired_tokens(&db_pool).await {
                tracing::warn!("Failed to sweep expired tokens: {e}");
            }
        }
    });

    tracing::info!("Router configured with periodic token sweeper");

    Ok(app)
}
