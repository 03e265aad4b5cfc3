//! Conversation history HTTP handlers.
//!
//! Endpoints:
//! - POST /history       - List a session's stored turns
//! - POST /clear-history - Forget a session (idempotent)

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use oncochat_types::chat::Turn;

use crate::state::AppState;

/// Request body naming a session. Absent or unparsable means the default session.
#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Value>,
}

impl SessionRequest {
    /// The session id when it is a string; anything else means the default session.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_ref().and_then(Value::as_str)
    }

    fn from_payload(payload: Result<Json<SessionRequest>, JsonRejection>) -> Self {
        payload.map(|Json(request)| request).unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryMessage {
    pub role: &'static str,
    pub content: String,
}

impl From<Turn> for HistoryMessage {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.speaker.display_role(),
            content: turn.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Serialize)]
pub struct ClearHistoryResponse {
    pub success: bool,
    pub message: &'static str,
}

/// POST /history - Stored turns, oldest first.
pub async fn get_history(
    State(state): State<AppState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Json<HistoryResponse> {
    let request = SessionRequest::from_payload(payload);
    let messages = state
        .chat_service
        .history(request.session_id())
        .into_iter()
        .map(HistoryMessage::from)
        .collect();

    Json(HistoryResponse {
        success: true,
        messages,
    })
}

/// POST /clear-history - Drop a session's history.
pub async fn clear_history(
    State(state): State<AppState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Json<ClearHistoryResponse> {
    let request = SessionRequest::from_payload(payload);
    state.chat_service.clear(request.session_id());

    Json(ClearHistoryResponse {
        success: true,
        message: "Conversation history cleared",
    })
}
