//! HTTP boundary: `/`, `/health` and `/predict`.

pub mod error;
pub mod handlers;

use crate::core::assets::AssetState;
use crate::utils::error::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Shared, read-only server state.
#[derive(Clone)]
pub struct AppState {
    assets: Arc<AssetState>,
}

impl AppState {
    pub fn new(assets: AssetState) -> Self {
        Self {
            assets: Arc::new(assets),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/predict", post(handlers::predict))
        .with_state(state)
}

/// Serves until Ctrl-C. Assets must already be loaded into `state`.
pub async fn run_server(bind_addr: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Prediction API listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Prediction API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
