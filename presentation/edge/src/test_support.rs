//! Shared helpers for router tests

use crate::{EdgeConfig, EdgeProxy, ResponsePolicy};
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use humanize_core::prelude::*;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

/// Scripted upstream that records every call it receives
pub struct StubHumanizer {
    humanize: ProxyResult<HumanizeResult>,
    batch: ProxyResult<BatchResult>,
    analyze: ProxyResult<AnalyzeResult>,
    forward: ProxyResult<RawReply>,
    health: ProxyResult<UpstreamHealth>,
    calls: AtomicUsize,
    pub last_humanize: Mutex<Option<UpstreamHumanizeRequest>>,
    pub last_batch: Mutex<Option<BatchHumanizeRequest>>,
    pub last_analyze: Mutex<Option<String>>,
    pub last_forward: Mutex<Option<(UpstreamRoute, Value)>>,
}

fn unscripted<T>() -> ProxyResult<T> {
    Err(ProxyError::UpstreamUnavailable("connection refused".to_string()))
}

impl Default for StubHumanizer {
    fn default() -> Self {
        Self {
            humanize: unscripted(),
            batch: unscripted(),
            analyze: unscripted(),
            forward: unscripted(),
            health: unscripted(),
            calls: AtomicUsize::new(0),
            last_humanize: Mutex::new(None),
            last_batch: Mutex::new(None),
            last_analyze: Mutex::new(None),
            last_forward: Mutex::new(None),
        }
    }
}

impl StubHumanizer {
    pub fn with_humanize(mut self, reply: ProxyResult<HumanizeResult>) -> Self {
        self.humanize = reply;
        self
    }

    pub fn with_batch(mut self, reply: ProxyResult<BatchResult>) -> Self {
        self.batch = reply;
        self
    }

    pub fn with_analyze(mut self, reply: ProxyResult<AnalyzeResult>) -> Self {
        self.analyze = reply;
        self
    }

    pub fn with_forward(mut self, reply: ProxyResult<RawReply>) -> Self {
        self.forward = reply;
        self
    }

    pub fn with_health(mut self, reply: ProxyResult<UpstreamHealth>) -> Self {
        self.health = reply;
        self
    }

    /// Number of outbound calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HumanizerService for StubHumanizer {
    async fn humanize(&self, request: &UpstreamHumanizeRequest) -> ProxyResult<HumanizeResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_humanize.lock().unwrap() = Some(request.clone());
        self.humanize.clone()
    }

    async fn humanize_batch(&self, request: &BatchHumanizeRequest) -> ProxyResult<BatchResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_batch.lock().unwrap() = Some(request.clone());
        self.batch.clone()
    }

    async fn analyze(&self, text: &str) -> ProxyResult<AnalyzeResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_analyze.lock().unwrap() = Some(text.to_string());
        self.analyze.clone()
    }

    async fn forward(&self, route: UpstreamRoute, body: &Value) -> ProxyResult<RawReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_forward.lock().unwrap() = Some((route, body.clone()));
        self.forward.clone()
    }

    async fn health(&self) -> ProxyResult<UpstreamHealth> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.health.clone()
    }
}

/// Router wired to a stub upstream under the given policy
pub fn router_with(stub: Arc<StubHumanizer>, policy: ResponsePolicy) -> Router {
    let config = EdgeConfig {
        response_policy: policy,
        ..Default::default()
    };
    EdgeProxy::new(config, stub).router()
}

/// Send one request through the router and decode the JSON reply
pub async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    send_raw(router, method, uri, body).await
}

/// Like [`send`] but with an arbitrary, possibly non-JSON, request body
pub async fn send_raw(router: Router, method: Method, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
