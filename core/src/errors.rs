//! Error types for the humanize edge proxy

use thiserror::Error;

/// Fallback detail used when an error carries no message of its own
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Main error type for proxy operations
///
/// Every variant is caught at the handler boundary and turned into a
/// well-formed HTTP response; none of them is fatal to the process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProxyError {
    /// The inbound body is missing a required field or has the wrong type
    #[error("{0}")]
    Validation(String),

    /// The upstream could not be reached at all
    #[error("Upstream request failed: {0}")]
    UpstreamUnavailable(String),

    /// The upstream answered with a non-success status code
    #[error("Humanizer service responded with status {status}")]
    UpstreamStatus { status: u16 },

    /// The upstream answered, but not with the JSON shape we expect
    #[error("Failed to parse upstream response: {0}")]
    UpstreamMalformed(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl ProxyError {
    /// Whether this error originated on the upstream side of the forward
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ProxyError::UpstreamUnavailable(_)
                | ProxyError::UpstreamStatus { .. }
                | ProxyError::UpstreamMalformed(_)
        )
    }

    /// Human readable detail for error response bodies
    pub fn details(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

/// Result type alias for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(ProxyError::UpstreamUnavailable("refused".into()).is_upstream());
        assert!(ProxyError::UpstreamStatus { status: 502 }.is_upstream());
        assert!(ProxyError::UpstreamMalformed("eof".into()).is_upstream());
        assert!(!ProxyError::Validation("bad".into()).is_upstream());
        assert!(!ProxyError::Configuration("bad".into()).is_upstream());
    }

    #[test]
    fn test_details_falls_back_to_unknown_error() {
        assert_eq!(ProxyError::Validation(String::new()).details(), UNKNOWN_ERROR);
        assert_eq!(
            ProxyError::UpstreamStatus { status: 500 }.details(),
            "Humanizer service responded with status 500"
        );
    }
}
