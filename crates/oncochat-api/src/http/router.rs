//! Axum router configuration with middleware.
//!
//! Every route is mounted twice: at the root and under `/api`, which is
//! where the web frontend calls them.
//! Middleware: panic catching, CORS, request tracing.
//!
//! When `web_dir` is configured and exists, unknown paths are served from
//! it with `index.html` as the fallback. Otherwise only the API is served.

use axum::Router;
use axum::http::Request;
use axum::routing::{get, post};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::http::error::panic_response;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
        tracing::info_span!(
            "http.request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %Uuid::now_v7(),
        )
    });

    let api_routes = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/health", get(handlers::health::health_check))
        .route("/history", post(handlers::history::get_history))
        .route("/clear-history", post(handlers::history::clear_history))
        .route("/debug-env", get(handlers::health::debug_env));

    let web_dir = state.config.web_dir.clone();

    let mut router = Router::new()
        .merge(api_routes.clone())
        .nest("/api", api_routes)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(trace)
        .with_state(state);

    if let Some(web_dir) = web_dir {
        if std::path::Path::new(&web_dir).is_dir() {
            let index_path = format!("{web_dir}/index.html");
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir, "Static file serving enabled");
        } else {
            tracing::warn!(path = %web_dir, "web_dir does not exist; serving API only");
        }
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConcreteChatService, CredentialStatus};
    use axum::body::Body;
    use axum::http::{StatusCode, header};
    use oncochat_core::catalog::ResponseCatalog;
    use oncochat_core::chat::ChatService;
    use oncochat_core::chat::replies::{DEGRADED_NOTICE, TECHNICAL_DIFFICULTIES};
    use oncochat_core::llm::box_provider::BoxLlmProvider;
    use oncochat_core::llm::client::{CompletionClient, GenerationSettings};
    use oncochat_core::llm::provider::LlmProvider;
    use oncochat_core::session::SessionStore;
    use oncochat_types::config::ServerConfig;
    use oncochat_types::llm::{CompletionRequest, CompletionResponse, LlmError, ModelInfo, Usage};
    use serde_json::{Value, json};
    use std::future::Future;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Clone)]
    struct StubProvider {
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        fn complete(
            &self,
            request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let fail = self.fail;
            let model = request.model.clone();
            async move {
                if fail {
                    return Err(LlmError::Timeout(30_000));
                }
                Ok(CompletionResponse {
                    content: "Gentle walks are usually fine; check with your care team.".to_string(),
                    model,
                    finish_reason: Some("STOP".to_string()),
                    usage: Usage::default(),
                })
            }
        }

        fn list_models(&self) -> impl Future<Output = Result<Vec<ModelInfo>, LlmError>> + Send {
            async { Ok(Vec::new()) }
        }
    }

    fn service(provider: Option<StubProvider>) -> ConcreteChatService {
        let client = provider.map(|p| {
            CompletionClient::new(
                BoxLlmProvider::new(p),
                vec!["gemini-2.5-flash".to_string(), "gemini-2.0-flash".to_string()],
                GenerationSettings::default(),
            )
        });
        ChatService::new(ResponseCatalog::builtin(), SessionStore::default(), client)
    }

    fn app_with(provider: Option<StubProvider>, config: ServerConfig) -> Router {
        let credential = CredentialStatus {
            configured: provider.is_some(),
            key_length: if provider.is_some() { 39 } else { 0 },
        };
        build_router(AppState::new(service(provider), config, credential, "test"))
    }

    fn app(provider: Option<StubProvider>) -> Router {
        app_with(provider, ServerConfig::default())
    }

    fn stub(fail: bool) -> StubProvider {
        StubProvider {
            fail,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(app, request).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_hi_on_new_session_answers_from_catalog() {
        let provider = stub(false);
        let app = app(Some(provider.clone()));

        let (status, body) =
            post_json(&app, "/chat", json!({ "message": "Hi", "sessionId": "s1" })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().contains("OncoChat"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        let (_, history) = post_json(&app, "/history", json!({ "sessionId": "s1" })).await;
        assert_eq!(history["success"], true);
        let messages = history["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "Hi");
        assert_eq!(messages[1]["role"], "bot");
    }

    #[tokio::test]
    async fn test_missing_message_is_bad_request() {
        let app = app(Some(stub(false)));

        let (status, body) = post_json(&app, "/chat", json!({ "sessionId": "s1" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Message is required" }));

        let (status, _) = post_json(&app, "/chat", json!({ "message": "" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_string_session_id_uses_default_session() {
        let provider = stub(false);
        let app = app(Some(provider.clone()));

        let (status, body) = post_json(
            &app,
            "/chat",
            json!({ "message": "Can I exercise?", "sessionId": 42 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().starts_with("Gentle walks"));

        let (_, history) = post_json(&app, "/history", json!({ "sessionId": 42 })).await;
        assert_eq!(history["messages"].as_array().unwrap().len(), 2);
        let (_, history) = post_json(&app, "/history", json!({})).await;
        assert_eq!(history["messages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_null_message_is_bad_request() {
        let app = app(Some(stub(false)));
        let (status, body) =
            post_json(&app, "/chat", json!({ "message": null, "sessionId": "s" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_non_string_message_gets_technical_difficulties() {
        let provider = stub(false);
        let app = app(Some(provider.clone()));

        let (status, body) = post_json(&app, "/chat", json!({ "message": 123 })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], TECHNICAL_DIFFICULTIES);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app(Some(stub(false)));
        let request = Request::builder()
            .method("POST")
            .uri("/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_model_reply_under_api_prefix() {
        let provider = stub(false);
        let app = app(Some(provider.clone()));

        let (status, body) = post_json(
            &app,
            "/api/chat",
            json!({ "message": "Can I exercise during chemo?", "sessionId": "s2" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["reply"].as_str().unwrap().starts_with("Gentle walks"));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);

        let (_, history) = post_json(&app, "/api/history", json!({ "sessionId": "s2" })).await;
        assert_eq!(history["messages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_all_candidates_failing_returns_fallback_with_ok_status() {
        let provider = stub(true);
        let app = app(Some(provider.clone()));

        let (status, body) = post_json(
            &app,
            "/chat",
            json!({ "message": "Is proton therapy an option?", "sessionId": "s3" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(
            body["reply"]
                .as_str()
                .unwrap()
                .contains("Is proton therapy an option?")
        );
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);

        let (_, history) = post_json(&app, "/history", json!({ "sessionId": "s3" })).await;
        assert!(history["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_degraded_mode_without_credential() {
        let app = app(None);

        let (status, body) =
            post_json(&app, "/chat", json!({ "message": "What is immunotherapy?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], DEGRADED_NOTICE);

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (status, health) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["gemini_configured"], false);
        assert!(health["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_clear_history_is_idempotent() {
        let app = app(Some(stub(false)));
        post_json(&app, "/chat", json!({ "message": "hello", "sessionId": "s4" })).await;

        for _ in 0..2 {
            let (status, body) =
                post_json(&app, "/clear-history", json!({ "sessionId": "s4" })).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(
                body,
                json!({ "success": true, "message": "Conversation history cleared" })
            );
        }

        let (_, history) = post_json(&app, "/history", json!({ "sessionId": "s4" })).await;
        assert!(history["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_without_body_uses_default_session() {
        let app = app(None);
        post_json(&app, "/chat", json!({ "message": "hi" })).await;

        let request = Request::builder()
            .method("POST")
            .uri("/history")
            .body(Body::empty())
            .unwrap();
        let (status, history) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history["messages"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_debug_env_never_exposes_key() {
        let app = app(Some(stub(false)));
        let request = Request::builder()
            .uri("/api/debug-env")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "has_api_key": true, "api_key_length": 39, "environment": "test" })
        );
    }

    #[tokio::test]
    async fn test_static_files_served_from_web_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>OncoChat</h1>").unwrap();
        let config = ServerConfig {
            web_dir: Some(dir.path().display().to_string()),
            ..ServerConfig::default()
        };
        let app = app_with(None, config);

        let request = Request::builder()
            .uri("/some/client/route")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>OncoChat</h1>");

        // API routes still take priority over the static fallback.
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let (_, health) = send(&app, request).await;
        assert_eq!(health["status"], "healthy");
    }
}
