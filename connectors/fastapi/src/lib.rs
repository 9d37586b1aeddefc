//! FastAPI humanizer connector
//!
//! Talks to the external humanizer service over HTTP. One request per call:
//! no retries and no client-side timeout are configured.

use async_trait::async_trait;
use humanize_core::prelude::*;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, error, info};

mod config;

pub use config::{FastApiConfig, DEFAULT_BASE_URL};

/// reqwest implementation of [`HumanizerService`]
pub struct FastApiHumanizer {
    client: Client,
    config: FastApiConfig,
}

impl FastApiHumanizer {
    /// Create a new connector, rejecting base URLs that cannot be parsed
    pub fn new(config: FastApiConfig) -> ProxyResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            ProxyError::Configuration(format!("Invalid humanizer base URL '{}': {}", config.base_url, e))
        })?;

        let client = Client::builder()
            .build()
            .map_err(|e| ProxyError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FastApiConfig {
        &self.config
    }

    async fn post_json<B: serde::Serialize + ?Sized>(&self, path: &str, body: &B) -> ProxyResult<Response> {
        let url = self.config.endpoint(path);
        debug!("POST {}", url);

        self.send(self.client.post(&url).json(body), &url).await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> ProxyResult<Response> {
        request.send().await.map_err(|e| {
            error!("Humanizer request to {} failed: {}", url, e);
            ProxyError::UpstreamUnavailable(e.to_string())
        })
    }

    /// Fail on non-success statuses without reading the upstream body
    fn ensure_success(response: &Response) -> ProxyResult<()> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            error!("Humanizer responded with {}", status);
            Err(ProxyError::UpstreamStatus {
                status: status.as_u16(),
            })
        }
    }

    async fn read_json(response: Response) -> ProxyResult<Value> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProxyError::UpstreamUnavailable(format!("Failed to read response body: {}", e)))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            error!("Humanizer returned a non-JSON body: {}", e);
            ProxyError::UpstreamMalformed(e.to_string())
        })
    }

    /// Decode a JSON object into one of the typed result shapes
    fn decode_object<T: DeserializeOwned>(body: Value) -> ProxyResult<T> {
        if !body.is_object() {
            return Err(ProxyError::UpstreamMalformed(
                "expected a JSON object".to_string(),
            ));
        }

        serde_json::from_value(body).map_err(|e| ProxyError::UpstreamMalformed(e.to_string()))
    }
}

#[async_trait]
impl HumanizerService for FastApiHumanizer {
    async fn humanize(&self, request: &UpstreamHumanizeRequest) -> ProxyResult<HumanizeResult> {
        let start_time = Instant::now();

        let response = self.post_json(UpstreamRoute::Humanize.path(), request).await?;
        Self::ensure_success(&response)?;
        let result: HumanizeResult = Self::decode_object(Self::read_json(response).await?)?;

        info!(
            "Humanized {} chars in {}ms (method: {})",
            request.text.len(),
            start_time.elapsed().as_millis(),
            result
                .method_used
                .as_ref()
                .and_then(serde_json::Value::as_str)
                .unwrap_or("unknown")
        );

        Ok(result)
    }

    async fn humanize_batch(&self, request: &BatchHumanizeRequest) -> ProxyResult<BatchResult> {
        let start_time = Instant::now();

        let response = self.post_json(UpstreamRoute::Batch.path(), request).await?;
        Self::ensure_success(&response)?;
        let result: BatchResult = Self::decode_object(Self::read_json(response).await?)?;

        info!(
            "Humanized batch of {} texts in {}ms",
            request.texts.len(),
            start_time.elapsed().as_millis()
        );

        Ok(result)
    }

    async fn analyze(&self, text: &str) -> ProxyResult<AnalyzeResult> {
        let url = self.config.endpoint(UpstreamRoute::Analyze.path());
        debug!("POST {} ({} chars)", url, text.len());

        // The service reads `text` from the query string, not the body
        let response = self
            .send(self.client.post(&url).query(&[("text", text)]), &url)
            .await?;
        Self::ensure_success(&response)?;

        Self::decode_object(Self::read_json(response).await?)
    }

    async fn forward(&self, route: UpstreamRoute, body: &Value) -> ProxyResult<RawReply> {
        let url = self.config.endpoint(route.path());
        debug!("POST {} (verbatim)", url);

        let mut request = self.client.post(&url).json(body);
        if route == UpstreamRoute::Analyze {
            if let Some(text) = body.get("text").and_then(Value::as_str) {
                request = request.query(&[("text", text)]);
            }
        }

        let response = self.send(request, &url).await?;
        let status = response.status().as_u16();
        let body = Self::read_json(response).await?;

        debug!("Relaying upstream {} reply with status {}", route.path(), status);
        Ok(RawReply { status, body })
    }

    async fn health(&self) -> ProxyResult<UpstreamHealth> {
        let url = self.config.endpoint("/health");
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url), &url).await?;

        let ok = response.status().is_success();
        let body = Self::read_json(response).await?;

        Ok(UpstreamHealth { ok, body })
    }
}
