//! Chat HTTP handler.
//!
//! Endpoint:
//! - POST /chat - Answer one message within a session

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use oncochat_core::chat::ReplySource;
use oncochat_types::error::ChatError;

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat.
///
/// Fields are kept as raw JSON so a wrongly typed field does not reject
/// the whole body.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<Value>,
}

impl ChatRequest {
    /// The session id when it is a string; anything else means the default session.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_ref().and_then(Value::as_str)
    }

    /// The message text. Absent or null is `None`; a non-string is an error.
    pub fn message(&self) -> Result<Option<&str>, ChatError> {
        match &self.message {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(text)) => Ok(Some(text)),
            Some(other) => Err(ChatError::Internal(format!(
                "message must be a string, got {}",
                json_type(other)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

/// POST /chat - Answer a message.
///
/// An unparsable body is treated the same as a missing message.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected chat body");
            return Err(ChatError::MissingMessage.into());
        }
    };

    let reply = state
        .chat_service
        .handle(request.session_id(), request.message()?)
        .await?;

    match &reply.source {
        ReplySource::Model { model } => tracing::debug!(model = %model, "Model reply"),
        source => tracing::debug!(?source, "Static reply"),
    }

    Ok(Json(ChatResponse { reply: reply.reply }))
}
