//! LlmProvider trait definition.
//!
//! This is the core abstraction that every text-generation backend implements.
//! Uses RPITIT for the async methods; see `BoxLlmProvider` for the
//! object-safe wrapper.

use oncochat_types::llm::{CompletionRequest, CompletionResponse, LlmError, ModelInfo};

/// Trait for LLM provider backends (Gemini, test doubles, etc.).
///
/// A provider is model-agnostic: the target model travels in
/// `CompletionRequest::model`, so one provider instance serves every
/// candidate in the fallback list.
///
/// Implementations live in oncochat-infra (e.g., `GeminiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;

    /// List the models visible to the configured credential.
    fn list_models(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send;
}
