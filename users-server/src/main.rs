//! users-server binary entry point

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use users_server::db::pool::DEFAULT_MAX_CONNECTIONS;
use users_server::tracing_setup::{self, TracingConfig};
use users_server::{PoolSettings, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "users-server",
    version,
    about = "HTTP CRUD service for users backed by PostgreSQL",
    long_about = "Serves /users over HTTP. Database connection parameters are read from \
                  DB_HOST, DB_PORT, DB_USER, DB_PASS and DB_NAME (a .env file in the \
                  working directory is honoured)."
)]
struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long, env = "USERS_BIND_ADDR", default_value = "127.0.0.1:8000")]
    bind: SocketAddr,

    /// Maximum number of pooled database connections
    #[arg(long, env = "USERS_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    max_connections: u32,

    /// Allow cross-origin requests from any origin
    #[arg(long)]
    cors_permissive: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug })?;

    let server = ServerConfig {
        bind_addr: cli.bind,
        cors_permissive: cli.cors_permissive,
    };

    users_server::serve(PoolSettings::with_max_connections(cli.max_connections), server)
        .await
        .context("users-server terminated with an error")?;

    Ok(())
}
