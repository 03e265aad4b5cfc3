//! GeminiProvider -- concrete [`LlmProvider`] implementation for Google Gemini.
//!
//! Sends requests to the Generative Language REST API
//! (`/v1beta/models/{model}:generateContent`) and lists models via
//! `/v1beta/models`. The target model comes from each request, so one
//! provider instance serves every candidate in the fallback list.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use oncochat_core::llm::provider::LlmProvider;
use oncochat_types::config::DEFAULT_API_BASE_URL;
use oncochat_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, ModelInfo, Usage,
};

use super::types::{
    GeminiContent, GeminiErrorEnvelope, GeminiPart, GenerateContentRequest,
    GenerateContentResponse, GenerationConfig, ListModelsResponse,
};

/// Google Gemini LLM provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GeminiProvider {
    /// API version path segment.
    const API_VERSION: &'static str = "v1beta";

    /// Page size requested when listing models.
    const LIST_PAGE_SIZE: u32 = 100;

    /// Create a new Gemini provider against the public endpoint.
    pub fn new(api_key: SecretString) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;
        Ok(Self::with_client(client, api_key))
    }

    /// Create a provider around an existing HTTP client.
    pub fn with_client(client: reqwest::Client, api_key: SecretString) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, Self::API_VERSION, path)
    }

    /// Accepts both `gemini-2.5-flash` and `models/gemini-2.5-flash`.
    fn model_path(model: &str) -> String {
        let name = model.strip_prefix("models/").unwrap_or(model);
        format!("models/{name}:generateContent")
    }

    /// Convert a generic [`CompletionRequest`] into a [`GenerateContentRequest`].
    fn to_gemini_request(request: &CompletionRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| GeminiContent {
                role: Some(
                    match m.role {
                        MessageRole::User => "user",
                        MessageRole::Assistant => "model",
                    }
                    .to_string(),
                ),
                parts: vec![GeminiPart {
                    text: Some(m.content.clone()),
                }],
            })
            .collect();

        GenerateContentRequest {
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
            },
        }
    }

    /// Map a non-success HTTP response to an [`LlmError`].
    async fn error_from_response(response: reqwest::Response) -> LlmError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GeminiErrorEnvelope>(&body)
            .map(|env| env.error.message)
            .unwrap_or(body);

        match status.as_u16() {
            401 | 403 => LlmError::AuthenticationFailed,
            429 => LlmError::RateLimited {
                retry_after_ms: None,
            },
            400 | 404 => LlmError::InvalidRequest(format!("HTTP {status}: {message}")),
            _ => LlmError::Provider {
                message: format!("HTTP {status}: {message}"),
            },
        }
    }
}

// No Debug impl: it would have to format the API key.

impl LlmProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = Self::to_gemini_request(request);
        let url = self.url(&Self::model_path(&request.model));

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let gemini_resp: GenerateContentResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        if let Some(reason) = gemini_resp
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(LlmError::Provider {
                message: format!("prompt blocked: {reason}"),
            });
        }

        let candidate = gemini_resp.candidates.first().ok_or(LlmError::EmptyResponse)?;

        // Concatenate text parts of the first candidate
        let content = candidate
            .content
            .as_ref()
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if content.is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        let usage = gemini_resp.usage_metadata.unwrap_or_default();

        Ok(CompletionResponse {
            content,
            model: gemini_resp
                .model_version
                .unwrap_or_else(|| request.model.clone()),
            finish_reason: candidate.finish_reason.clone(),
            usage: Usage {
                input_tokens: usage.prompt_token_count,
                output_tokens: usage.candidates_token_count,
            },
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = self.url("models");
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut query = vec![("pageSize", Self::LIST_PAGE_SIZE.to_string())];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }

            let response = self
                .client
                .get(&url)
                .header("x-goog-api-key", self.api_key.expose_secret())
                .query(&query)
                .send()
                .await
                .map_err(|e| LlmError::Provider {
                    message: format!("HTTP request failed: {e}"),
                })?;

            if !response.status().is_success() {
                return Err(Self::error_from_response(response).await);
            }

            let page: ListModelsResponse = response.json().await.map_err(|e| {
                LlmError::Deserialization(format!("failed to parse model list: {e}"))
            })?;

            models.extend(page.models.into_iter().map(|m| ModelInfo {
                name: m.name,
                description: m.description,
                supported_methods: m.supported_generation_methods,
            }));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncochat_types::llm::Message;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_provider(base_url: &str) -> GeminiProvider {
        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .expect("failed to create HTTP client");
        GeminiProvider::with_client(client, SecretString::from("test-key".to_string()))
            .with_base_url(base_url)
    }

    fn test_request(model: &str) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![
                Message::user("scope"),
                Message::assistant("ok"),
                Message::user("What helps with nausea?"),
            ],
            max_tokens: 1000,
            temperature: Some(0.7),
        }
    }

    #[test]
    fn test_provider_name() {
        let provider = test_provider("http://localhost");
        assert_eq!(LlmProvider::name(&provider), "gemini");
    }

    #[test]
    fn test_model_path_strips_prefix() {
        assert_eq!(
            GeminiProvider::model_path("models/gemini-2.5-flash"),
            "models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            GeminiProvider::model_path("gemini-2.0-flash"),
            "models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let provider = test_provider("http://localhost:9999/");
        assert_eq!(provider.url("models"), "http://localhost:9999/v1beta/models");
    }

    #[test]
    fn test_to_gemini_request_maps_roles() {
        let req = GeminiProvider::to_gemini_request(&test_request("m"));
        let roles: Vec<_> = req
            .contents
            .iter()
            .map(|c| c.role.clone().unwrap())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(req.generation_config.max_output_tokens, 1000);
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "maxOutputTokens": 1000 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "role": "model", "parts": [{ "text": "Try ginger " }, { "text": "tea." }] },
                    "finishReason": "STOP"
                }],
                "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 4 },
                "modelVersion": "gemini-2.5-flash"
            })))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        let resp = provider.complete(&test_request("gemini-2.5-flash")).await.unwrap();

        assert_eq!(resp.content, "Try ginger tea.");
        assert_eq!(resp.model, "gemini-2.5-flash");
        assert_eq!(resp.finish_reason.as_deref(), Some("STOP"));
        assert_eq!(resp.usage.input_tokens, 12);
        assert_eq!(resp.usage.output_tokens, 4);
    }

    #[tokio::test]
    async fn test_complete_maps_not_found_to_invalid_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "models/gemini-pro is not found", "status": "NOT_FOUND" }
            })))
            .mount(&server)
            .await;

        let err = test_provider(&server.uri())
            .complete(&test_request("gemini-pro"))
            .await
            .unwrap_err();
        match err {
            LlmError::InvalidRequest(msg) => assert!(msg.contains("is not found")),
            other => panic!("expected InvalidRequest, got {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_maps_auth_and_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/denied:generateContent"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/busy:generateContent"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let provider = test_provider(&server.uri());
        assert!(matches!(
            provider.complete(&test_request("denied")).await,
            Err(LlmError::AuthenticationFailed)
        ));
        assert!(matches!(
            provider.complete(&test_request("busy")).await,
            Err(LlmError::RateLimited { .. })
        ));
    }

    #[tokio::test]
    async fn test_complete_without_candidates_is_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = test_provider(&server.uri())
            .complete(&test_request("m"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_list_models_follows_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(query_param("pageToken", "next"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{
                    "name": "models/text-embedding-004",
                    "supportedGenerationMethods": ["embedContent"]
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{
                    "name": "models/gemini-2.5-flash",
                    "description": "Fast model",
                    "supportedGenerationMethods": ["generateContent", "countTokens"]
                }],
                "nextPageToken": "next"
            })))
            .mount(&server)
            .await;

        let models = test_provider(&server.uri()).list_models().await.unwrap();
        assert_eq!(models.len(), 2);
        assert!(models[0].supports_generate_content());
        assert!(!models[1].supports_generate_content());
    }
}
