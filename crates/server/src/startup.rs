use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use service::executor::{ProcedureExecutor, SeaOrmProcedureExecutor};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Assemble the router around any executor; the binary passes the SeaORM one, tests a mock.
pub fn build_app(executor: Arc<dyn ProcedureExecutor>) -> Router {
    routes::build_router(ServerState::new(executor), build_cors())
}

/// Connect the pool described by `cfg` and serve until Ctrl+C, letting in-flight calls finish.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let executor: Arc<dyn ProcedureExecutor> = Arc::new(SeaOrmProcedureExecutor::new(db));
    let app = build_app(executor);

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, max_connections = cfg.database.max_connections, "store catalog listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "ctrl-c handler unavailable; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received, draining requests");
}
