use thiserror::Error;

/// Errors surfaced by the chat orchestration layer.
///
/// `MissingMessage` becomes a 400. `Internal` covers requests that pass the
/// presence check but cannot be handled (such as a non-string message) and
/// is answered with a generic reply; model failures never surface here.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Message is required")]
    MissingMessage,

    #[error("no API credential configured")]
    CredentialAbsent,

    #[error("internal error: {0}")]
    Internal(String),
}

/// Errors from loading configuration or credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    Read { path: String, message: String },

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_message_display() {
        assert_eq!(ChatError::MissingMessage.to_string(), "Message is required");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Read {
            path: "oncochat.toml".to_string(),
            message: "permission denied".to_string(),
        };
        assert!(err.to_string().contains("oncochat.toml"));
        assert!(err.to_string().contains("permission denied"));
    }
}
