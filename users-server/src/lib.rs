//! users-server: HTTP CRUD service for users backed by PostgreSQL
//!
//! Layers, leaves first:
//! - [`models`]: the user entity, its boundary views and their validation
//! - [`db`]: connection pool, schema bootstrap and the user repository
//! - [`http`]: axum router, extractors and error mapping

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod tracing_setup;

pub use config::DatabaseSettings;
pub use db::PoolSettings;
pub use error::{Error, Result};
pub use http::{AppState, ServerConfig};

/// Load database settings, connect, bootstrap the schema, serve until
/// shutdown, then close the pool.
pub async fn serve(pool_settings: PoolSettings, server: ServerConfig) -> Result<()> {
    let database = DatabaseSettings::load()?;

    tracing::info!(
        host = %database.host,
        port = database.port,
        database = %database.name,
        max_connections = pool_settings.max_connections,
        "Connecting to database"
    );
    let pool = db::create_pool_with_options(&database.url(), pool_settings).await?;

    db::migrations::run(&pool).await?;

    let result = http::run_server(pool.clone(), server).await;

    pool.close().await;
    tracing::info!("Database pool closed");

    result.map_err(Error::from)
}
