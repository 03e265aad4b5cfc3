//! Chat request orchestration.
//!
//! Validate → history fetch → catalog check (empty transcript only) →
//! model call → persist or fall back. Once a message passes validation,
//! `handle` always produces a reply.

use oncochat_types::chat::{Turn, resolve_session_id};
use oncochat_types::error::ChatError;

use crate::catalog::ResponseCatalog;
use crate::llm::client::CompletionClient;
use crate::session::{SessionStore, TranscriptStore};

use super::replies;

/// Where a reply came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// Canned catalog answer to an opening message.
    Catalog,
    /// Generated by the named candidate model.
    Model { model: String },
    /// No credential configured; static notice.
    Degraded,
    /// Every candidate failed; static apology.
    Fallback,
}

/// The reply to one chat message.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub reply: String,
    pub source: ReplySource,
}

/// Orchestrates catalog lookup, session history, and the model call.
///
/// Generic over the transcript store so the in-memory [`SessionStore`] can
/// be swapped for another backend without changing callers.
pub struct ChatService<S: TranscriptStore = SessionStore> {
    catalog: ResponseCatalog,
    sessions: S,
    client: Option<CompletionClient>,
}

impl<S: TranscriptStore> ChatService<S> {
    /// Create a chat service. `client` is `None` when no API credential is
    /// configured; the service then never attempts a model call.
    pub fn new(catalog: ResponseCatalog, sessions: S, client: Option<CompletionClient>) -> Self {
        Self {
            catalog,
            sessions,
            client,
        }
    }

    /// Whether a completion client (and therefore a credential) is available.
    pub fn credential_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn sessions(&self) -> &S {
        &self.sessions
    }

    pub fn catalog(&self) -> &ResponseCatalog {
        &self.catalog
    }

    /// Handle one chat message for a session.
    ///
    /// Fails only with [`ChatError::MissingMessage`]; every later failure
    /// degrades to a static reply.
    #[tracing::instrument(name = "chat.handle", skip_all, fields(session_id))]
    pub async fn handle(
        &self,
        session_id: Option<&str>,
        message: Option<&str>,
    ) -> Result<ChatReply, ChatError> {
        let message = match message {
            Some(m) if !m.is_empty() => m,
            _ => return Err(ChatError::MissingMessage),
        };
        let session_id = resolve_session_id(session_id);
        tracing::Span::current().record("session_id", session_id);
        tracing::debug!(chars = message.chars().count(), "Received message");

        let session = self.sessions.get_or_create(session_id);

        if session.is_empty() {
            if let Some(canned) = self.catalog.lookup(message) {
                tracing::info!("Answered from response catalog");
                self.sessions.append_exchange(session_id, message, canned);
                return Ok(ChatReply {
                    reply: canned.to_string(),
                    source: ReplySource::Catalog,
                });
            }
        }

        let Some(client) = &self.client else {
            tracing::info!(reason = %ChatError::CredentialAbsent, "Replying in degraded mode");
            return Ok(ChatReply {
                reply: replies::DEGRADED_NOTICE.to_string(),
                source: ReplySource::Degraded,
            });
        };

        match client.complete(&session.transcript, message).await {
            Ok(outcome) => {
                self.sessions
                    .append_exchange(session_id, message, &outcome.reply);
                Ok(ChatReply {
                    reply: outcome.reply,
                    source: ReplySource::Model {
                        model: outcome.model,
                    },
                })
            }
            Err(err) => {
                tracing::warn!(error = %err, "Using fallback reply");
                Ok(ChatReply {
                    reply: replies::fallback_reply(message),
                    source: ReplySource::Fallback,
                })
            }
        }
    }

    /// Current transcript for a session (absent sessions read as empty).
    pub fn history(&self, session_id: Option<&str>) -> Vec<Turn> {
        self.sessions
            .get_or_create(resolve_session_id(session_id))
            .transcript
    }

    /// Drop a session's history. Idempotent.
    pub fn clear(&self, session_id: Option<&str>) {
        let session_id = resolve_session_id(session_id);
        if self.sessions.clear(session_id) {
            tracing::info!(session_id, "Cleared conversation history");
        }
    }
}
