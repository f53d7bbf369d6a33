//! Marina entry-point: loads settings, selects the entity store and serves
//! the REST API.

mod server;

use std::time::Duration;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marina::config::MarinaSettings;
use marina::inbound::http::health::HealthState;
use marina::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

const DB_CONNECTION_TIMEOUT: Duration = Duration::from_secs(5);

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = MarinaSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let mut config = ServerConfig::new(settings.bind_addr(), settings.base_url());
    if let Some(database_url) = settings.database_url() {
        config = config.with_db_pool(connect_database(database_url).await?);
    } else {
        info!("no database configured; entities are kept in memory");
    }

    info!(addr = %settings.bind_addr(), base_url = settings.base_url(), "starting marina");
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}

/// Apply pending migrations and open the connection pool.
async fn connect_database(database_url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(database_url)
        .await
        .map_err(|e| std::io::Error::other(format!("database migrations failed: {e}")))?;
    DbPool::new(PoolConfig::new(database_url).with_connection_timeout(DB_CONNECTION_TIMEOUT))
        .await
        .map_err(|e| std::io::Error::other(format!("database pool creation failed: {e}")))
}
