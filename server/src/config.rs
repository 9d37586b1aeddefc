//! Configuration management for the edge server

use crate::cli::Cli;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use humanize_connector_fastapi::{FastApiConfig, DEFAULT_BASE_URL};
use humanize_core::ProxyError;
use humanize_edge::{EdgeConfig, ResponsePolicy};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Single environment variable historically used to point at the humanizer
pub const UPSTREAM_URL_ENV: &str = "FASTAPI_HUMANIZER_URL";

/// Configuration for the edge server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the proxy listens on
    pub bind_address: SocketAddr,
    /// Humanizer service base URL
    pub upstream_url: String,
    /// Enable permissive CORS
    pub enable_cors: bool,
    /// How upstream outcomes are shaped: `normalize` (default) or legacy `passthrough`
    pub response_policy: ResponsePolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let edge = EdgeConfig::default();
        Self {
            bind_address: edge.bind_address,
            upstream_url: DEFAULT_BASE_URL.to_string(),
            enable_cors: edge.enable_cors,
            response_policy: edge.response_policy,
        }
    }
}

impl ServerConfig {
    /// Load configuration from defaults, files and environment
    pub fn load(config_path: &Option<PathBuf>) -> Result<Self, ProxyError> {
        let mut figment = Figment::from(Serialized::defaults(ServerConfig::default()));

        // Load from default config file if it exists
        let default_config_paths = ["humanize-edge.yaml", "humanize-edge.yml", ".humanize-edge.yaml"];

        for path in &default_config_paths {
            if Path::new(path).exists() {
                figment = figment.merge(Yaml::file(path));
                break;
            }
        }

        // Load from specified config file
        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Yaml::file(path));
            } else {
                return Err(ProxyError::Configuration(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
        }

        figment = figment
            .merge(Env::raw().only(&[UPSTREAM_URL_ENV]).map(|_| "upstream_url".into()))
            .merge(Env::prefixed("HUMANIZE_EDGE_"));

        figment
            .extract()
            .map_err(|e| ProxyError::Configuration(format!("Failed to parse configuration: {}", e)))
    }

    /// Apply CLI argument overrides to the configuration
    pub fn with_overrides(mut self, args: &Cli) -> Self {
        if let Some(bind) = args.bind {
            self.bind_address = bind;
        }

        if let Some(ref url) = args.upstream_url {
            self.upstream_url = url.clone();
        }

        if let Some(policy) = args.policy {
            self.response_policy = policy;
        }

        if args.no_cors {
            self.enable_cors = false;
        }

        self
    }

    pub fn edge_config(&self) -> EdgeConfig {
        EdgeConfig {
            bind_address: self.bind_address,
            enable_cors: self.enable_cors,
            response_policy: self.response_policy,
        }
    }

    pub fn connector_config(&self) -> FastApiConfig {
        FastApiConfig::new(self.upstream_url.clone())
    }
}
