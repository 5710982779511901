//! HTTP surface.
//!
//! | Route             | Method | Body                      |
//! |-------------------|--------|---------------------------|
//! | `/`               | GET    | service metadata          |
//! | `/health`         | GET    | `{"status": "ok"}`        |
//! | `/versions`       | GET    | tool version map          |
//! | `/analyze/`       | POST   | normalized analysis       |
//!
//! Handlers delegate to [`AnalysisService`], running it on tokio's blocking
//! pool since the engines are synchronous child processes.

mod handlers;

use crate::analysis::AnalysisService;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

/// Paths advertised by `GET /`.
pub const ENDPOINTS: &[&str] = &["/", "/health", "/versions", "/analyze/"];

pub fn router(service: AnalysisService) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/versions", get(handlers::versions))
        .route("/analyze/", post(handlers::analyze))
        .route("/analyze", post(handlers::analyze))
        .with_state(service)
}

/// Bind `address` and serve until Ctrl-C.
pub async fn serve(service: AnalysisService, address: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
