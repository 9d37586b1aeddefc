//! Response bodies produced by the edge handlers

use humanize_core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Constant label identifying this proxy in health bodies
pub const SERVICE_NAME: &str = "humanize-edge-proxy";

pub const HUMANIZE_FAILED: &str = "Failed to humanize text";
pub const BATCH_FAILED: &str = "Failed to humanize batch";
pub const ANALYZE_FAILED: &str = "Failed to analyze text";
pub const UPSTREAM_UNAVAILABLE: &str = "FastAPI service unavailable";

/// Normalized humanize response, rebuilt field by field from the upstream result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: HumanizeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl NormalizedResponse {
    pub fn success(result: HumanizeResult) -> Self {
        Self {
            success: true,
            result,
            error: None,
            details: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: &ProxyError) -> Self {
        Self {
            success: false,
            result: HumanizeResult::default(),
            error: Some(message.into()),
            details: Some(error.details()),
        }
    }
}

/// Normalized batch response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_texts: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_detection_rate: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl BatchResponse {
    pub fn success(result: BatchResult) -> Self {
        Self {
            success: true,
            results: result.results,
            total_texts: result.total_texts,
            average_detection_rate: result.average_detection_rate,
            error: None,
            details: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: &ProxyError) -> Self {
        Self {
            success: false,
            results: None,
            total_texts: None,
            average_detection_rate: None,
            error: Some(message.into()),
            details: Some(error.details()),
        }
    }
}

/// Normalized analyze response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: AnalyzeResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalyzeResponse {
    pub fn success(result: AnalyzeResult) -> Self {
        Self {
            success: true,
            result,
            error: None,
            details: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: &ProxyError) -> Self {
        Self {
            success: false,
            result: AnalyzeResult::default(),
            error: Some(message.into()),
            details: Some(error.details()),
        }
    }
}

/// Bare `{ "error": ... }` body used for validation failures and the legacy 503
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Body returned by the health relay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub service: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fastapi_health: Option<Value>,
    pub status: HealthState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn relayed(upstream: UpstreamHealth) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            fastapi_health: Some(upstream.body),
            status: if upstream.ok {
                HealthState::Healthy
            } else {
                HealthState::Degraded
            },
            error: None,
        }
    }

    pub fn unhealthy(error: &ProxyError) -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
            fastapi_health: None,
            status: HealthState::Unhealthy,
            error: Some(error.details()),
        }
    }
}

/// Liveness of the proxy process itself
#[derive(Debug, Serialize)]
pub struct Liveness {
    pub service: &'static str,
    pub status: &'static str,
    pub version: &'static str,
}

impl Default for Liveness {
    fn default() -> Self {
        Self {
            service: SERVICE_NAME,
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_flattens_result_fields() {
        let result: HumanizeResult = serde_json::from_value(json!({
            "original": "a",
            "humanized": "b",
            "processing_time_ms": 340
        }))
        .unwrap();

        let body = serde_json::to_value(NormalizedResponse::success(result)).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "original": "a", "humanized": "b", "processing_time_ms": 340})
        );
    }

    #[test]
    fn test_failure_shape() {
        let err = ProxyError::UpstreamStatus { status: 500 };
        let body = serde_json::to_value(NormalizedResponse::failure(HUMANIZE_FAILED, &err)).unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "error": "Failed to humanize text",
                "details": "Humanizer service responded with status 500"
            })
        );
    }

    #[test]
    fn test_health_status_from_upstream_signal() {
        let healthy = HealthStatus::relayed(UpstreamHealth { ok: true, body: json!({"ok": true}) });
        assert_eq!(healthy.status, HealthState::Healthy);
        assert_eq!(healthy.fastapi_health, Some(json!({"ok": true})));

        let degraded = HealthStatus::relayed(UpstreamHealth { ok: false, body: json!({}) });
        assert_eq!(degraded.status, HealthState::Degraded);

        let unhealthy = HealthStatus::unhealthy(&ProxyError::UpstreamMalformed("eof".into()));
        let body = serde_json::to_value(unhealthy).unwrap();
        assert_eq!(body["status"], json!("unhealthy"));
        assert_eq!(body["service"], json!(SERVICE_NAME));
        assert!(body.get("fastapi_health").is_none());
    }
}
