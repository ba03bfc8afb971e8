//! Router setup with routes and middleware.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use neo_core::config::NeoConfig;
use neo_core::error::NeoError;

use crate::handlers;
use crate::state::AppState;

/// Envelopes are small; anything bigger is not a host turn.
const BODY_LIMIT: usize = 64 * 1024;

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/skill", post(handlers::skill))
        .route("/health", get(handlers::health))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on the configured address.
pub async fn start_server(config: &NeoConfig, state: AppState) -> Result<(), NeoError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);

    let router = create_router(state);

    tracing::info!(addr = %addr, "Starting skill server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| NeoError::Server(format!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| NeoError::Server(format!("Server error: {}", e)))?;

    Ok(())
}
