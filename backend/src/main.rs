//! Backend entry-point: loads settings, picks storage and serves the API.

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use board_backend::inbound::http::health::HealthState;
use board_backend::outbound::persistence::{DbPool, PoolConfig};
use board_backend::server::{ServerConfig, create_server};
use board_backend::settings::{BoardSettings, StorageBackend};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BoardSettings::load().wrap_err("failed to load settings")?;
    if settings.uses_default_secret() {
        warn!("BOARD_JWT_SECRET is unset; tokens are signed with the public default secret");
    }

    let mut config = ServerConfig::new(
        settings.bind_addr()?,
        settings.jwt_secret(),
        settings.token_ttl()?,
    );

    match settings.storage()? {
        StorageBackend::Postgres => {
            let pool = DbPool::new(
                PoolConfig::new(settings.database_url()).with_max_size(settings.pool_size()),
            )
            .await
            .wrap_err("failed to build database pool")?;
            config = config.with_db_pool(pool);
        }
        StorageBackend::Memory => {
            warn!("using in-memory storage; data is lost on restart");
        }
    }

    info!(addr = %config.bind_addr(), database = config.uses_database(), "starting server");
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start server")?;
    server.await.wrap_err("server terminated with an error")
}
