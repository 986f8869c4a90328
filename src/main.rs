#![forbid(unsafe_code)]

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use transit_admin::infra::init_db;
use transit_admin::{build_router, AppState, ServerConfig};

fn init_tracing(log_json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        log::warn!("could not install Ctrl-C handler; shutting down");
    }
    log::info!("shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cfg = ServerConfig::from_env()?;
    init_tracing(cfg.log_json);

    log::info!("DB path: {:?}", cfg.db_path);
    let pool = init_db(&cfg.db_path).map_err(|e| {
        log::error!("DB init failed: {}", e);
        e.to_string()
    })?;

    let app = build_router(AppState::new(pool));
    let listener = TcpListener::bind(cfg.bind)
        .await
        .map_err(|e| format!("bind {} failed: {e}", cfg.bind))?;
    log::info!("transit-admin listening on http://{}", cfg.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {e}"))
}
