//! Server configuration loader.
//!
//! Reads a TOML file into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed, so a bare `oncochat serve` always starts.

use std::path::Path;

use oncochat_types::config::ServerConfig;
use oncochat_types::error::ConfigError;

/// Default config file name looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "oncochat.toml";

/// Load configuration from `path`, falling back to defaults.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file cannot be read, fails to parse, or fails validation, logs a
///   warning and returns the default.
pub async fn load_config(path: &Path) -> ServerConfig {
    match try_load_config(path).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            ServerConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            ServerConfig::default()
        }
    }
}

/// Load and validate configuration from `path`.
///
/// Returns `Ok(None)` when the file does not exist.
pub async fn try_load_config(path: &Path) -> Result<Option<ServerConfig>, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: path.display().to_string(),
                message: err.to_string(),
            });
        }
    };

    let config = toml::from_str::<ServerConfig>(&content)
        .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
    config.validate()?;
    Ok(Some(config))
}
