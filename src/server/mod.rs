//! HTTP front end.
//!
//! Provides five endpoints:
//! - `/` - HTML form
//! - `/download` - HTML result page for a resolve request
//! - `/api/download` - JSON `ResolutionResult`
//! - `/proxy` - streams a resolved media URL through this service
//! - `/status` - JSON snapshot of the processing counters
//!
//! Every request runs on its own tokio task; handlers share only the
//! immutable `AppState`.

mod handlers;
mod page;
mod types;

use axum::routing::get;
use axum::Router;

use crate::config::{Config, PROXY_PATH};
use handlers::{api_download_handler, download_handler, index_handler, proxy_handler, status_handler};
pub use types::{AppState, StatusResponse};

/// Builds the router with all routes bound to `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/download", get(download_handler))
        .route("/api/download", get(api_download_handler))
        .route(PROXY_PATH, get(proxy_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Binds the configured address and serves until the process is stopped.
pub async fn start_server(config: &Config, state: AppState) -> Result<(), anyhow::Error> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind server to {}: {}", addr, e))?;

    log::info!("Server listening on http://{}/", addr);
    log::info!("  - API: http://{}/api/download?url=...", addr);
    log::info!("  - Status: http://{}/status", addr);

    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}
