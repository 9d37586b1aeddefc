//! Configuration for the FastAPI humanizer connector

use serde::{Deserialize, Serialize};

/// Placeholder used when no base URL has been configured
pub const DEFAULT_BASE_URL: &str = "https://your-app-name.onrender.com";

/// Humanizer service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastApiConfig {
    /// Base URL of the humanizer service, without a trailing path
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl FastApiConfig {
    /// Create a new config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Full URL for an upstream path such as `/humanize`
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for FastApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
