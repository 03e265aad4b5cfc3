//! Health and diagnostics handlers.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

/// GET /health - Liveness plus whether a model credential is configured.
pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "gemini_configured": state.chat_service.credential_configured(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /debug-env - Credential presence and length. Never the value.
pub async fn debug_env(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "has_api_key": state.credential.configured,
        "api_key_length": state.credential.key_length,
        "environment": state.environment,
    }))
}
