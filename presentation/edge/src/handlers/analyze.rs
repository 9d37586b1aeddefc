//! Forwarding handler for `POST /api/humanize/analyze`

use super::{bad_request, parse_body, passthrough};
use crate::{AnalyzeResponse, AppState, ResponsePolicy, ANALYZE_FAILED};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use humanize_core::prelude::*;
use tracing::{debug, error, warn};

/// Ask the humanizer how AI-like a text reads, without rewriting it
pub async fn analyze(State(state): State<AppState>, body: Bytes) -> Response {
    if state.config.response_policy == ResponsePolicy::Passthrough {
        return passthrough(&state, UpstreamRoute::Analyze, &body).await;
    }

    // Same `text` rule as humanize; `mode` is read but unused here
    let request = match parse_body(&body, TEXT_REQUIRED).and_then(|value| HumanizeRequest::from_value(&value)) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected analyze request: {}", e);
            return bad_request(&e);
        }
    };

    debug!("Forwarding {} chars to humanizer for analysis", request.text.len());

    match state.humanizer.analyze(&request.text).await {
        Ok(result) => Json(AnalyzeResponse::success(result)).into_response(),
        Err(e) => {
            error!("Analyze API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(AnalyzeResponse::failure(ANALYZE_FAILED, &e)),
            )
                .into_response()
        }
    }
}
