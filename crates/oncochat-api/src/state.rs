//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the REST API.
//! `ChatService` is generic over its transcript store, but AppState pins it
//! to the in-memory [`SessionStore`].

use std::sync::Arc;

use secrecy::SecretString;

use oncochat_core::catalog::ResponseCatalog;
use oncochat_core::chat::ChatService;
use oncochat_core::session::{SessionStore, SessionStoreConfig};
use oncochat_infra::llm::build_completion_client;
use oncochat_infra::secret::{EnvCredentialProvider, secret_len};
use oncochat_types::config::ServerConfig;

/// Environment variable naming the deployment environment.
pub const ENVIRONMENT_VAR: &str = "ONCOCHAT_ENV";

pub type ConcreteChatService = ChatService<SessionStore>;

/// What is known about the configured credential, without the credential.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CredentialStatus {
    pub configured: bool,
    pub key_length: usize,
}

impl CredentialStatus {
    pub fn from_key(key: Option<&SecretString>) -> Self {
        match key {
            Some(key) => Self {
                configured: true,
                key_length: secret_len(key),
            },
            None => Self::default(),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub config: Arc<ServerConfig>,
    pub credential: CredentialStatus,
    pub environment: String,
}

impl AppState {
    /// Wire the session store, catalog, and completion client from config
    /// and the process environment.
    pub fn init(config: ServerConfig) -> anyhow::Result<Self> {
        let api_key = EnvCredentialProvider::new().api_key();
        let credential = CredentialStatus::from_key(api_key.as_ref());
        let client = build_completion_client(&config, api_key)?;

        let sessions = SessionStore::new(SessionStoreConfig {
            retention_window: config.retention_window,
            idle_timeout: config.idle_timeout(),
            sweep_interval: config.sweep_interval(),
        });
        let chat_service = ChatService::new(ResponseCatalog::builtin(), sessions, client);

        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());

        Ok(Self::new(chat_service, config, credential, environment))
    }

    pub fn new(
        chat_service: ConcreteChatService,
        config: ServerConfig,
        credential: CredentialStatus,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            chat_service: Arc::new(chat_service),
            config: Arc::new(config),
            credential,
            environment: environment.into(),
        }
    }
}
