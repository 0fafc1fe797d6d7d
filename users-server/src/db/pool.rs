//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created once
//! at startup, handed to the router through `AppState`, and closed after
//! graceful shutdown.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connections kept open while idle.
const DEFAULT_MIN_CONNECTIONS: u32 = 5;

/// Hard upper bound on open connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 15;

/// Pool sizing knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub min_connections: u32,
    pub max_connections: u32,
}

impl PoolSettings {
    /// Settings with a custom ceiling. The idle floor never exceeds it.
    pub fn with_max_connections(max_connections: u32) -> Self {
        let max_connections = max_connections.max(1);
        Self {
            min_connections: DEFAULT_MIN_CONNECTIONS.min(max_connections),
            max_connections,
        }
    }
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self::with_max_connections(DEFAULT_MAX_CONNECTIONS)
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns an error if the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/users").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    create_pool_with_options(database_url, PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// Connects eagerly so a bad URL or unreachable server fails startup instead
/// of the first request.
pub async fn create_pool_with_options(
    database_url: &str,
    settings: PoolSettings,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .min_connections(settings.min_connections)
        .max_connections(settings.max_connections)
        .connect(database_url)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings() {
        let settings = PoolSettings::default();
        assert_eq!(settings.min_connections, 5);
        assert_eq!(settings.max_connections, 15);
    }

    #[test]
    fn idle_floor_follows_small_ceiling() {
        let settings = PoolSettings::with_max_connections(2);
        assert_eq!(settings.min_connections, 2);
        assert_eq!(settings.max_connections, 2);

        let settings = PoolSettings::with_max_connections(0);
        assert_eq!(settings.max_connections, 1);
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p users-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }
}
