use std::{future::Future, sync::Arc};

use axum::Router;
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use service::pieces::{
    repo::{MemoryPieceRepository, SeaOrmPieceRepository},
    PieceRepository,
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured storage backend. Postgres runs pending migrations
/// unless `database.run_migrations` is off.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let repo: Arc<dyn PieceRepository> = match cfg.storage.backend {
        StorageBackend::Memory => {
            warn!(backend = "memory", "pieces are kept in process memory and lost on restart");
            Arc::new(MemoryPieceRepository::new())
        }
        StorageBackend::Postgres => {
            let db = models::db::connect_with_config(&cfg.database).await?;
            if cfg.database.run_migrations {
                models::db::migrate(&db).await?;
            }
            Arc::new(SeaOrmPieceRepository::new(db))
        }
    };
    Ok(ServerState::new(repo))
}

pub fn build_app(state: ServerState, cfg: &AppConfig) -> Router {
    routes::build_router(state, build_cors(), cfg.docs.enabled)
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg).await?;
    let app = build_app(state, &cfg);

    let addr = cfg.server.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, backend = ?cfg.storage.backend, docs = cfg.docs.enabled, "pieces api listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("pieces api stopped");
    Ok(())
}

/// Load configuration and serve until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    run_until(cfg, shutdown_signal()).await
}

pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl_c listener failed; shutting down");
    }
}
