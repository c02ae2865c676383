//! PostgreSQL pool construction and schema migrations.
//!
//! The store may come up after the service (e.g. under docker compose), so the
//! first connection is retried a fixed number of times with a fixed delay. If
//! every attempt fails the error is returned and startup aborts.

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tokio_retry::Retry;
use tokio_retry::strategy::FixedInterval;

use crate::config::{Config, mask_connection_string};

/// Builds pool options from the configured limits and timeouts.
pub fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
}

/// Connects to the database, retrying on failure.
///
/// Makes at most `db_connect_retries` attempts, waiting `db_retry_delay`
/// seconds between them.
///
/// # Errors
///
/// Returns the last connection error once all attempts are exhausted.
pub async fn connect_with_retry(config: &Config) -> Result<PgPool> {
    let total = config.db_connect_retries.max(1);
    let strategy = FixedInterval::new(config.retry_delay()).take(total as usize - 1);
    let options = pool_options(config);
    let url = config.database_url.clone();

    let mut attempt = 0u32;
    let pool = Retry::spawn(strategy, || {
        attempt += 1;
        let current = attempt;
        let options = options.clone();
        let url = url.clone();
        async move {
            options.connect(&url).await.inspect_err(|e| {
                tracing::warn!(
                    attempt = current,
                    total,
                    error = %e,
                    "Database connection failed ({current}/{total})"
                );
            })
        }
    })
    .await
    .with_context(|| {
        format!(
            "Could not connect to {} after {} attempts",
            mask_connection_string(&config.database_url),
            total
        )
    })?;

    tracing::info!(attempts = attempt, "Connected to database");
    Ok(pool)
}

/// Applies pending migrations from `./migrations`.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database schema is up to date");
    Ok(())
}
