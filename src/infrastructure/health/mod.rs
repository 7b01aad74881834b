//! Liveness endpoint
//!
//! A static 200 on `/` and `/health` for external process-health probes.
//! No other HTTP surface.

use axum::{routing::get, Router};

use crate::application::errors::BotError;

pub fn router() -> Router {
    Router::new()
        .route("/", get(alive))
        .route("/health", get(alive))
}

async fn alive() -> &'static str {
    "running"
}

/// Bind and serve the liveness router until the process exits.
pub async fn serve(port: u16) -> Result<(), BotError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| BotError::Network(format!("Failed to bind health port {}: {}", port, e)))?;
    tracing::info!("Liveness endpoint listening on :{}", port);
    axum::serve(listener, router())
        .await
        .map_err(|e| BotError::Network(e.to_string()))
}
