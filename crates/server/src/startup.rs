use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router over the collections described by `cfg`.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    common::env::ensure_data_dir(&cfg.storage.data_dir).await?;
    let state = AppState::open(&cfg.storage).await?;
    Ok(routes::build_router(state, build_cors()))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and serve it until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    info!(addr = %listener.local_addr()?, "chirp server listening");
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
