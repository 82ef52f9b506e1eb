//! HTTP front end
//!
//! # Routes
//!
//! - `GET /` - Form page
//! - `POST /` - Convert (or clear) from the form page
//! - `POST /download` - Cleaned text as a file attachment
//! - `POST /api/convert` - JSON API
//! - `GET /health` - Health check

use axum::{
    Router,
    routing::{get, post},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod error_response;
pub mod page;
pub mod routes;
pub mod state;

pub use state::AppState;

/// Create the router with all route definitions
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index).post(routes::submit))
        .route("/download", post(routes::download))
        .route("/api/convert", post(routes::convert))
        .route("/health", get(routes::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl-C
pub async fn serve(addr: SocketAddr, state: AppState) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
