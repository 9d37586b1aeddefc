//! Forwarding handler for `POST /api/humanize`

use super::{bad_request, parse_body, passthrough};
use crate::{AppState, NormalizedResponse, ResponsePolicy, HUMANIZE_FAILED};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use humanize_core::prelude::*;
use tracing::{debug, error, warn};

/// Forward a humanize request according to the configured response policy
pub async fn humanize(State(state): State<AppState>, body: Bytes) -> Response {
    match state.config.response_policy {
        ResponsePolicy::Normalize => normalize(&state, &body).await,
        ResponsePolicy::Passthrough => passthrough(&state, UpstreamRoute::Humanize, &body).await,
    }
}

async fn normalize(state: &AppState, body: &[u8]) -> Response {
    let request = match parse_body(body, TEXT_REQUIRED).and_then(|value| HumanizeRequest::from_value(&value)) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected humanize request: {}", e);
            return bad_request(&e);
        }
    };

    debug!(
        "Forwarding {} chars to humanizer (mode: {:?})",
        request.text.len(),
        request.mode
    );

    let upstream = UpstreamHumanizeRequest::from(request);
    match state.humanizer.humanize(&upstream).await {
        Ok(result) => Json(NormalizedResponse::success(result)).into_response(),
        Err(e) => {
            error!("Humanize API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(NormalizedResponse::failure(HUMANIZE_FAILED, &e)),
            )
                .into_response()
        }
    }
}
