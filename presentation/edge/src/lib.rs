//! Edge proxy for the humanizer service
//!
//! Exposes `/api/humanize` and its batch and analyze siblings to browsers and
//! forwards each call to the FastAPI humanizer, either reshaping the result
//! (the default) or relaying it verbatim.

use axum::{
    routing::{get, post},
    Router,
};
use humanize_core::HumanizerService;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod handlers;
mod middleware;
mod models;

#[cfg(test)]
mod test_support;

pub use models::*;

/// How upstream outcomes are turned into edge responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponsePolicy {
    /// Validate `text`, rebuild the body, 500 on any upstream failure
    #[default]
    Normalize,
    /// Legacy: relay the upstream body and status verbatim, 503 when the call raises
    Passthrough,
}

impl FromStr for ResponsePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normalize" => Ok(ResponsePolicy::Normalize),
            "passthrough" => Ok(ResponsePolicy::Passthrough),
            other => Err(format!(
                "unknown response policy '{}', expected 'normalize' or 'passthrough'",
                other
            )),
        }
    }
}

/// Edge server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeConfig {
    /// Server bind address
    pub bind_address: SocketAddr,
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// How upstream outcomes are shaped: `normalize` (default) or legacy `passthrough`
    pub response_policy: ResponsePolicy,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([0, 0, 0, 0], 3000)),
            enable_cors: true,
            response_policy: ResponsePolicy::default(),
        }
    }
}

/// Errors raised while starting or running the server
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub humanizer: Arc<dyn HumanizerService>,
    pub config: EdgeConfig,
}

/// The edge proxy: configuration plus the upstream it forwards to
pub struct EdgeProxy {
    config: EdgeConfig,
    humanizer: Arc<dyn HumanizerService>,
}

impl EdgeProxy {
    pub fn new(config: EdgeConfig, humanizer: Arc<dyn HumanizerService>) -> Self {
        Self { config, humanizer }
    }

    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Build the Axum router with all routes
    pub fn router(&self) -> Router {
        let app_state = AppState {
            humanizer: self.humanizer.clone(),
            config: self.config.clone(),
        };

        let mut router = Router::new()
            // Proxy liveness
            .route("/health", get(handlers::health::liveness))
            // Humanize forwarding and the upstream health relay
            .route(
                "/api/humanize",
                post(handlers::humanize::humanize).get(handlers::health::health_relay),
            )
            .route("/api/humanize/batch", post(handlers::batch::humanize_batch))
            .route("/api/humanize/analyze", post(handlers::analyze::analyze))
            .layer(axum::middleware::from_fn(middleware::request_logging))
            .with_state(app_state);

        if self.config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
    }

    /// Bind and serve until the listener fails
    pub async fn serve(&self) -> Result<(), ServeError> {
        let addr = self.config.bind_address;
        info!("Starting humanize edge proxy on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ServeError::Bind { addr, source })?;

        info!(
            "Humanize edge proxy listening on {} ({:?} policy)",
            addr, self.config.response_policy
        );

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
