//! The upstream seam: anything that can answer humanization requests

use crate::errors::ProxyResult;
use crate::types::{
    AnalyzeResult, BatchHumanizeRequest, BatchResult, HumanizeResult, RawReply, UpstreamHealth,
    UpstreamHumanizeRequest, UpstreamRoute,
};
use async_trait::async_trait;
use serde_json::Value;

/// Trait for humanizer service backends
///
/// Implementations make exactly one outbound attempt per call. Retrying,
/// timing out and queuing are deliberately not part of this contract.
#[async_trait]
pub trait HumanizerService: Send + Sync {
    /// Humanize a single text; non-success statuses are errors
    async fn humanize(&self, request: &UpstreamHumanizeRequest) -> ProxyResult<HumanizeResult>;

    /// Humanize several texts in one upstream call
    async fn humanize_batch(&self, request: &BatchHumanizeRequest) -> ProxyResult<BatchResult>;

    /// Score a text for AI-detection indicators without rewriting it
    async fn analyze(&self, text: &str) -> ProxyResult<AnalyzeResult>;

    /// Forward a body verbatim and hand back whatever status and JSON came back
    async fn forward(&self, route: UpstreamRoute, body: &Value) -> ProxyResult<RawReply>;

    /// Query the upstream health endpoint
    async fn health(&self) -> ProxyResult<UpstreamHealth>;
}
