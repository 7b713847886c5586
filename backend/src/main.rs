//! Backend entry-point: loads configuration, prepares the database and
//! serves the recipe pages.

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_backend::inbound::http::health::HealthState;
use recipe_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use recipe_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use recipe_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use recipe_backend::server::{ServerConfig, create_server};
use recipe_backend::settings::AppSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io::Error::other(err.to_string()))?;
    let database_url = settings.database_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;

    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session signing key loaded"
    );

    if settings.run_migrations() {
        run_pending_migrations(database_url)
            .await
            .map_err(io::Error::other)?;
    } else {
        info!("skipping database migrations");
    }

    let pool = DbPool::new(PoolConfig::new(database_url).with_max_size(settings.db_pool_size()))
        .await
        .map_err(io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        pool,
    );
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}
