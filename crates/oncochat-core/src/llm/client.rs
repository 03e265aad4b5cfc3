//! Ordered model fallback for completion calls.
//!
//! The same request is sent to each candidate model in priority order until
//! one succeeds. There is no retry against the same model and no backoff:
//! a failing candidate is logged and the next one is tried. Each attempt is
//! bounded by a timeout, and a timeout counts as that candidate failing.

use std::time::{Duration, Instant};

use tracing::{Instrument, info_span};

use oncochat_types::chat::Turn;
use oncochat_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::box_provider::BoxLlmProvider;
use super::prompt;

/// Generation settings applied identically to every candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub request_timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 1000,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A successful completion and the candidate that produced it.
#[derive(Debug, Clone)]
pub struct CompletionOutcome {
    pub reply: String,
    pub model: String,
    /// Zero-based position of the winning candidate.
    pub attempt: usize,
}

/// Stateless client that tries candidate models in priority order.
#[derive(Debug)]
pub struct CompletionClient {
    provider: BoxLlmProvider,
    models: Vec<String>,
    settings: GenerationSettings,
}

impl CompletionClient {
    pub fn new(provider: BoxLlmProvider, models: Vec<String>, settings: GenerationSettings) -> Self {
        Self {
            provider,
            models,
            settings,
        }
    }

    /// Candidate models in priority order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn provider(&self) -> &BoxLlmProvider {
        &self.provider
    }

    /// Generate a reply to `new_message` given the conversation so far.
    ///
    /// Returns the first successful candidate's reply. Fails with
    /// [`LlmError::AllModelsExhausted`] when every candidate fails, or when
    /// there are no candidates at all.
    pub async fn complete(
        &self,
        transcript: &[Turn],
        new_message: &str,
    ) -> Result<CompletionOutcome, LlmError> {
        let messages = prompt::build_messages(transcript, new_message);

        for (attempt, model) in self.models.iter().enumerate() {
            let request = CompletionRequest {
                model: model.clone(),
                messages: messages.clone(),
                max_tokens: self.settings.max_output_tokens,
                temperature: Some(self.settings.temperature),
            };

            let span = info_span!(
                "gen_ai.complete",
                gen_ai.system = self.provider.name(),
                gen_ai.request.model = %model,
                gen_ai.request.max_tokens = request.max_tokens,
                gen_ai.request.temperature = ?request.temperature,
                attempt,
            );

            let start = Instant::now();
            match self.attempt(&request).instrument(span).await {
                Ok(response) => {
                    tracing::info!(
                        model = %model,
                        attempt,
                        latency_ms = start.elapsed().as_millis() as u64,
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        "Model reply received"
                    );
                    return Ok(CompletionOutcome {
                        reply: response.content,
                        model: model.clone(),
                        attempt,
                    });
                }
                Err(err) => {
                    tracing::warn!(
                        model = %model,
                        attempt,
                        error = %err,
                        "Model invocation failed, trying next candidate"
                    );
                }
            }
        }

        tracing::error!(candidates = self.models.len(), "All candidate models failed");
        Err(LlmError::AllModelsExhausted {
            attempts: self.models.len(),
        })
    }

    /// One bounded call against a single candidate.
    async fn attempt(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let timeout = self.settings.request_timeout;
        let response = tokio::time::timeout(timeout, self.provider.complete(request))
            .await
            .map_err(|_| LlmError::Timeout(timeout.as_millis() as u64))??;

        if response.content.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }
        Ok(response)
    }
}
