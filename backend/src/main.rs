//! Backend entry-point: wires REST endpoints, persistence, and OpenAPI docs.

mod server;

use actix_web::web;
use diesel::{Connection, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::fingerprint::key_fingerprint;
use backend::inbound::http::session_config::{session_settings_from_env, BuildMode};
use backend::outbound::persistence::{DbPool, PoolConfig};

use server::{AppConfig, ServerConfig};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply pending migrations on a blocking thread before the pool comes up.
async fn run_migrations(database_url: &str) -> std::io::Result<()> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&url)
            .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|applied| {
                if !applied.is_empty() {
                    info!(count = applied.len(), "applied database migrations");
                }
            })
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))
    })
    .await
    .map_err(|e| std::io::Error::other(format!("migration task failed: {e}")))?
}

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

    let app_config = AppConfig::load()
        .map_err(|e| std::io::Error::other(format!("configuration failed: {e}")))?;
    let bind_addr = app_config
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let settings = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        key_fingerprint = %key_fingerprint(&settings.key),
        cookie_secure = settings.cookie_secure,
        "session configured"
    );

    let mut config = ServerConfig::new(
        settings.key,
        settings.cookie_secure,
        settings.same_site,
        bind_addr,
    );

    match app_config.database_url() {
        Some(url) => {
            run_migrations(url).await?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; using in-memory repositories"),
    }

    let health_state = web::Data::new(HealthState::new());
    let server = server::create_server(health_state, config)?;
    info!(addr = %bind_addr, "server listening");
    server.await
}
