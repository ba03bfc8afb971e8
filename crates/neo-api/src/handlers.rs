//! Route handler functions.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// POST /skill - handle one conversation turn.
pub async fn skill(
    State(state): State<AppState>,
    payload: Result<Json<RequestEnvelope>, JsonRejection>,
) -> Result<Json<ResponseEnvelope>, ApiError> {
    let Json(envelope) = payload?;
    let request = envelope.skill_request()?;
    let session = envelope.session_info();

    let outcome = state
        .handler
        .handle(&session, request, envelope.state())
        .await
        .map_err(|e| {
            tracing::warn!(
                request_id = %session.request_id,
                error = %e,
                "Turn rejected"
            );
            ApiError::from(e)
        })?;

    Ok(Json(ResponseEnvelope::new(outcome.response, &outcome.state)))
}

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
