//! Forwarding handler for `POST /api/humanize/batch`

use super::{bad_request, parse_body, passthrough};
use crate::{AppState, BatchResponse, ResponsePolicy, BATCH_FAILED};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use humanize_core::prelude::*;
use tracing::{debug, error, warn};

/// Forward a batch of texts according to the configured response policy
pub async fn humanize_batch(State(state): State<AppState>, body: Bytes) -> Response {
    if state.config.response_policy == ResponsePolicy::Passthrough {
        return passthrough(&state, UpstreamRoute::Batch, &body).await;
    }

    let request = match parse_body(&body, TEXTS_REQUIRED).and_then(|value| BatchHumanizeRequest::from_value(&value)) {
        Ok(request) => request,
        Err(e) => {
            warn!("Rejected batch request: {}", e);
            return bad_request(&e);
        }
    };

    debug!("Forwarding batch of {} texts to humanizer", request.texts.len());

    match state.humanizer.humanize_batch(&request).await {
        Ok(result) => Json(BatchResponse::success(result)).into_response(),
        Err(e) => {
            error!("Batch humanize API error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(BatchResponse::failure(BATCH_FAILED, &e)),
            )
                .into_response()
        }
    }
}
