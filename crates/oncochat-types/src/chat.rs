//! Conversation types: speakers, turns, and session snapshots.
//!
//! A session's transcript is an ordered list of [`Turn`]s alternating
//! user/assistant. The live transcript is owned by the session store in
//! `oncochat-core`; the [`Session`] here is a cloned snapshot.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session identifier used when the caller does not supply one.
pub const DEFAULT_SESSION_ID: &str = "default";

/// Who produced a turn in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Role label used by the chat frontend (`"user"` or `"bot"`).
    pub fn display_role(&self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Assistant => "bot",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Speaker::User),
            "assistant" | "bot" | "model" => Ok(Speaker::Assistant),
            other => Err(format!("invalid speaker: '{other}'")),
        }
    }
}

/// A single message in a session transcript.
///
/// `text` is the literal content exchanged with the model, never the
/// scope-decorated prompt variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }
}

/// Snapshot of a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub transcript: Vec<Turn>,
    pub last_accessed: DateTime<Utc>,
}

impl Session {
    /// Create an empty session touched at `now`.
    pub fn new(session_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            session_id: session_id.into(),
            transcript: Vec::new(),
            last_accessed: now,
        }
    }

    /// Whether no exchange has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.transcript.is_empty()
    }

    /// Number of complete user/assistant exchanges.
    pub fn exchange_count(&self) -> usize {
        self.transcript.len() / 2
    }
}

/// Resolve a caller-supplied session id, substituting [`DEFAULT_SESSION_ID`]
/// for absent or blank values.
pub fn resolve_session_id(session_id: Option<&str>) -> &str {
    match session_id {
        Some(id) if !id.trim().is_empty() => id,
        _ => DEFAULT_SESSION_ID,
    }
}
