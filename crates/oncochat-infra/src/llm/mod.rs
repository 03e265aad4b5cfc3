//! LLM provider implementations.
//!
//! Contains the Gemini implementation of the [`LlmProvider`] trait defined
//! in `oncochat-core`, plus [`build_completion_client`], which wires the
//! configured candidate models and generation settings around it.
//!
//! [`LlmProvider`]: oncochat_core::llm::provider::LlmProvider

pub mod gemini;

use secrecy::SecretString;

use oncochat_core::llm::box_provider::BoxLlmProvider;
use oncochat_core::llm::client::{CompletionClient, GenerationSettings};
use oncochat_types::config::ServerConfig;
use oncochat_types::llm::LlmError;

use self::gemini::GeminiProvider;

/// Create a boxed Gemini provider for the given API base URL.
pub fn create_provider(api_key: SecretString, base_url: &str) -> Result<BoxLlmProvider, LlmError> {
    let provider = GeminiProvider::new(api_key)?.with_base_url(base_url);
    Ok(BoxLlmProvider::new(provider))
}

/// Generation settings derived from the server configuration.
pub fn generation_settings(config: &ServerConfig) -> GenerationSettings {
    GenerationSettings {
        temperature: config.temperature,
        max_output_tokens: config.max_output_tokens,
        request_timeout: config.request_timeout(),
    }
}

/// Build the completion client, or `None` when no credential is available.
///
/// Without a credential the chat service runs in degraded mode and never
/// attempts a model call.
pub fn build_completion_client(
    config: &ServerConfig,
    api_key: Option<SecretString>,
) -> Result<Option<CompletionClient>, LlmError> {
    let Some(api_key) = api_key else {
        tracing::warn!("GEMINI_API_KEY not set; chat replies limited to catalog and static notices");
        return Ok(None);
    };

    let provider = create_provider(api_key, &config.api_base_url)?;
    tracing::info!(
        provider = provider.name(),
        models = ?config.models,
        "Completion client ready"
    );
    Ok(Some(CompletionClient::new(
        provider,
        config.models.clone(),
        generation_settings(config),
    )))
}
