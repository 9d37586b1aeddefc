//! Core data types for the humanize edge proxy

use crate::errors::{ProxyError, ProxyResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Detection rate target sent with every single-text request. Never derived from input.
pub const TARGET_DETECTION_RATE: f64 = 20.0;

/// Upper bound on texts accepted by the batch route, mirroring the service limit
pub const MAX_BATCH_TEXTS: usize = 100;

pub const TEXT_REQUIRED: &str = "Text is required and must be a string";
pub const TEXTS_REQUIRED: &str = "Texts are required and must be a non-empty array of strings";
pub const PARALLEL_PROCESSING_INVALID: &str = "parallel_processing must be a boolean";

/// Processing modes understood by the humanizer service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// Regex patterns only
    Fast,
    /// Regex plus selective model rewriting
    #[default]
    Balanced,
    /// Full restructuring
    Aggressive,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Fast => "fast",
            ProcessingMode::Balanced => "balanced",
            ProcessingMode::Aggressive => "aggressive",
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `mode` a caller asked for.
///
/// Values outside [`ProcessingMode`] are not rejected here; they are forwarded
/// untouched and the upstream decides what to do with them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestedMode {
    Known(ProcessingMode),
    Unrecognized(Value),
}

impl Default for RequestedMode {
    fn default() -> Self {
        RequestedMode::Known(ProcessingMode::default())
    }
}

impl RequestedMode {
    /// Interpret an optional `mode` field from an inbound body. Absent or null means the default.
    pub fn from_field(field: Option<&Value>) -> Self {
        match field {
            None | Some(Value::Null) => Self::default(),
            Some(value) => serde_json::from_value::<ProcessingMode>(value.clone())
                .map(RequestedMode::Known)
                .unwrap_or_else(|_| RequestedMode::Unrecognized(value.clone())),
        }
    }

    pub fn known(&self) -> Option<ProcessingMode> {
        match self {
            RequestedMode::Known(mode) => Some(*mode),
            RequestedMode::Unrecognized(_) => None,
        }
    }
}

/// A validated inbound humanization request
#[derive(Debug, Clone, PartialEq)]
pub struct HumanizeRequest {
    pub text: String,
    pub mode: RequestedMode,
}

impl HumanizeRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            mode: RequestedMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ProcessingMode) -> Self {
        self.mode = RequestedMode::Known(mode);
        self
    }

    /// Validate an untyped inbound body.
    ///
    /// `text` must be present, a string, and non-empty. Unknown fields are ignored.
    pub fn from_value(body: &Value) -> ProxyResult<Self> {
        let text = match body.get("text") {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            _ => return Err(ProxyError::Validation(TEXT_REQUIRED.to_string())),
        };

        Ok(Self {
            text,
            mode: RequestedMode::from_field(body.get("mode")),
        })
    }
}

/// Body sent to `POST {base}/humanize`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamHumanizeRequest {
    pub text: String,
    pub mode: RequestedMode,
    pub target_detection_rate: f64,
}

impl From<HumanizeRequest> for UpstreamHumanizeRequest {
    fn from(request: HumanizeRequest) -> Self {
        Self {
            text: request.text,
            mode: request.mode,
            target_detection_rate: TARGET_DETECTION_RATE,
        }
    }
}

/// Keep an explicit `null` as `Some(Value::Null)` so it is echoed rather than dropped
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

/// Result returned by the humanizer service.
///
/// Neither presence nor type of the fields is checked: each one is lifted out
/// of the upstream object as-is, and whatever is missing upstream stays
/// missing downstream. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HumanizeResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub original: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub humanized: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ai_detection_estimate: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub method_used: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub changes_applied: Option<Value>,
}

/// A validated inbound batch request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchHumanizeRequest {
    pub texts: Vec<String>,
    pub mode: RequestedMode,
    pub parallel_processing: bool,
}

impl BatchHumanizeRequest {
    /// Validate an untyped inbound batch body
    pub fn from_value(body: &Value) -> ProxyResult<Self> {
        let invalid = || ProxyError::Validation(TEXTS_REQUIRED.to_string());

        let items = body.get("texts").and_then(Value::as_array).ok_or_else(invalid)?;
        if items.is_empty() || items.len() > MAX_BATCH_TEXTS {
            return Err(invalid());
        }

        let texts = items
            .iter()
            .map(|item| match item {
                Value::String(text) if !text.is_empty() => Ok(text.clone()),
                _ => Err(invalid()),
            })
            .collect::<ProxyResult<Vec<_>>>()?;

        let parallel_processing = match body.get("parallel_processing") {
            None | Some(Value::Null) => true,
            Some(Value::Bool(flag)) => *flag,
            Some(_) => {
                return Err(ProxyError::Validation(
                    PARALLEL_PROCESSING_INVALID.to_string(),
                ))
            }
        };

        Ok(Self {
            texts,
            mode: RequestedMode::from_field(body.get("mode")),
            parallel_processing,
        })
    }
}

/// Aggregate result returned by `POST {base}/batch`, fields lifted as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub results: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub total_texts: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub average_detection_rate: Option<Value>,
}

/// Indicators returned by `POST {base}/analyze`, fields lifted as-is
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub ai_detection_estimate: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub needs_enhancement: Option<Value>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub indicators: Option<Value>,
}

/// Outcome of `GET {base}/health`: the opaque body plus the HTTP ok signal
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamHealth {
    pub ok: bool,
    pub body: Value,
}

/// Verbatim upstream reply used by the passthrough policy
#[derive(Debug, Clone, PartialEq)]
pub struct RawReply {
    pub status: u16,
    pub body: Value,
}

/// Upstream endpoints a raw forward can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamRoute {
    Humanize,
    Batch,
    Analyze,
}

impl UpstreamRoute {
    pub fn path(&self) -> &'static str {
        match self {
            UpstreamRoute::Humanize => "/humanize",
            UpstreamRoute::Batch => "/batch",
            UpstreamRoute::Analyze => "/analyze",
        }
    }
}
