//! Health check handlers

use crate::{AppState, HealthStatus, Liveness};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

/// Liveness of the proxy itself; never calls upstream
pub async fn liveness() -> Json<Liveness> {
    Json(Liveness::default())
}

/// Relay the upstream health endpoint.
///
/// A reachable but unhappy upstream is reported as `degraded` in the body with
/// a 200 status; only a call that raises yields 503.
pub async fn health_relay(State(state): State<AppState>) -> Response {
    match state.humanizer.health().await {
        Ok(upstream) => {
            if !upstream.ok {
                warn!("Humanizer health endpoint reports a non-success status");
            }
            Json(HealthStatus::relayed(upstream)).into_response()
        }
        Err(e) => {
            error!("Humanizer health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthStatus::unhealthy(&e))).into_response()
        }
    }
}
