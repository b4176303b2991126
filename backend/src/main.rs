//! Backend entry-point: loads settings, prepares storage, and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use taskdeck::inbound::http::health::HealthState;
use taskdeck::inbound::http::token_config::{BuildMode, token_key_from_env};
use taskdeck::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use taskdeck::settings::AppSettings;

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let token_ttl = settings.token_ttl().map_err(std::io::Error::other)?;
    let token_key = token_key_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(bind_addr, token_key)
        .with_token_ttl(token_ttl)
        .with_hash_cost(settings.hash_cost());

    if let Some(database_url) = settings.database_url() {
        if settings.skip_migrations {
            info!("skipping database migrations");
        } else {
            run_pending_migrations(database_url)
                .await
                .map_err(std::io::Error::other)?;
        }
        let mut pool_config = PoolConfig::new(database_url);
        if let Some(size) = settings.db_pool_size {
            pool_config = pool_config.with_max_size(size);
        }
        let pool = DbPool::new(pool_config)
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "taskdeck listening");
    server.await
}
