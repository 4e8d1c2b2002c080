/**
 * Server Configuration
 *
 * This module loads server configuration from the environment and builds
 * the bounded PostgreSQL connection pool.
 *
 * # Configuration Sources
 *
 * Environment variables, with development defaults where a default is
 * safe. `DATABASE_URL` has no default: the authentication core cannot run
 * without storage, so startup fails fast instead of limping along.
 *
 * # Pool Sizing
 *
 * The pool is the one scarce cross-request resource: bounded connections
 * (20 by default), a 5 second acquisition timeout and a 10 minute idle
 * timeout. Connections are acquired per logical transaction and released
 * promptly.
 */

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Default maximum number of pooled connections
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// How long a request may wait for a pooled connection
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// How long an idle connection is kept before being closed
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Process configuration collected at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub max_connections: u32,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is unset.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set".to_string())?;

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(3000);

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            database_url,
            port,
            max_connections,
        })
    }
}

/// Build the connection pool and run migrations
///
/// # Errors
///
/// Connection or migration failure aborts startup; the authentication
/// core has nothing to do without its storage collaborator.
pub async fn load_database(config: &AppConfig) -> Result<PgPool, sqlx::Error> {
    tracing::info!(
        max_connections = config.max_connections,
        "Connecting to database..."
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[serial_test::serial]
    fn test_config_requires_database_url() {
        std::env::remove_var("DATABASE_URL");
        assert!(AppConfig::from_env().is_err());
    }

    #[test]
    #[serial_test::serial]
    fn test_config_defaults() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/craftlink");
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("DB_MAX_CONNECTIONS");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);

        std::env::remove_var("DATABASE_URL");
    }

    #[test]
    #[serial_test::serial]
    fn test_config_reads_overrides() {
        std::env::set_var("DATABASE_URL", "postgres://localhost/craftlink");
        std::env::set_var("SERVER_PORT", "8080");
        std::env::set_var("DB_MAX_CONNECTIONS", "5");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_connections, 5);

        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("SERVER_PORT");
        std::env::remove_var("DB_MAX_CONNECTIONS");
    }
}
