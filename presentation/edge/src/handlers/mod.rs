//! HTTP request handlers for the edge proxy

pub mod analyze;
pub mod batch;
pub mod health;
pub mod humanize;

use crate::{AppState, ErrorBody, UPSTREAM_UNAVAILABLE};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use humanize_core::prelude::*;
use serde_json::Value;
use tracing::{debug, error};

/// Decode an inbound body, mapping anything that is not JSON to a validation error
pub(crate) fn parse_body(body: &[u8], message: &str) -> ProxyResult<Value> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Inbound body is not JSON: {}", e);
        ProxyError::Validation(message.to_string())
    })
}

pub(crate) fn bad_request(error: &ProxyError) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::new(error.to_string()))).into_response()
}

/// Legacy relay: upstream status and body go back untouched.
///
/// Anything that raises on the way (unparseable inbound body, network error,
/// non-JSON reply) collapses into a fixed 503.
pub(crate) async fn passthrough(state: &AppState, route: UpstreamRoute, body: &[u8]) -> Response {
    let outcome = match serde_json::from_slice::<Value>(body) {
        Ok(value) => state.humanizer.forward(route, &value).await,
        Err(e) => Err(ProxyError::Validation(format!("Invalid JSON body: {}", e))),
    };

    match outcome {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(reply.body)).into_response()
        }
        Err(e) => {
            error!("Passthrough to {} failed: {}", route.path(), e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody::new(UPSTREAM_UNAVAILABLE)),
            )
                .into_response()
        }
    }
}
