//! Server configuration types for OncoChat.
//!
//! `ServerConfig` represents the optional `oncochat.toml` that controls the
//! listen address, candidate model list, generation settings, and session
//! retention. Every field has a default, so an empty file is valid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base URL of the Gemini REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Top-level configuration for the OncoChat server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Candidate model identifiers in priority order.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Sampling temperature applied to every candidate.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum output tokens applied to every candidate.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Per-candidate request timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of turns kept per session (user + assistant).
    #[serde(default = "default_retention_window")]
    pub retention_window: usize,

    /// Sessions idle for longer than this are evicted by the sweeper.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// How often the sweeper runs.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    /// Directory holding the static chat frontend, if any.
    #[serde(default)]
    pub web_dir: Option<String>,

    /// Base URL of the generative-language REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_models() -> Vec<String> {
    vec![
        "gemini-2.5-flash".to_string(),
        "gemini-2.0-flash".to_string(),
        "gemini-1.5-flash".to_string(),
    ]
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_output_tokens() -> u32 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_retention_window() -> usize {
    20
}

fn default_idle_timeout_secs() -> u64 {
    3600
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            models: default_models(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
            request_timeout_secs: default_request_timeout_secs(),
            retention_window: default_retention_window(),
            idle_timeout_secs: default_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            web_dir: None,
            api_base_url: default_api_base_url(),
        }
    }
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }

    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retention_window < 2 {
            return Err(ConfigError::Invalid(format!(
                "retention_window must be at least 2, got {}",
                self.retention_window
            )));
        }
        if self.sweep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sweep_interval_secs must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::Invalid(format!(
                "temperature must be within 0.0..=2.0, got {}",
                self.temperature
            )));
        }
        if self.models.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "model identifiers must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
