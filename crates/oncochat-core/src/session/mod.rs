//! Per-session conversation storage.
//!
//! [`TranscriptStore`] is the seam the chat service depends on;
//! [`SessionStore`] is the in-memory implementation backed by `DashMap`,
//! and [`SessionSweeper`] owns the background task that evicts idle sessions.

pub mod store;
pub mod sweeper;

pub use store::{SessionStore, SessionStoreConfig};
pub use sweeper::SessionSweeper;

use chrono::{DateTime, Utc};

use oncochat_types::chat::Session;

/// Storage for bounded, expiring conversation transcripts.
///
/// Implementations must be safe to call from concurrent requests and from
/// the sweeper at the same time. Every method that touches a session
/// refreshes its last-access time.
pub trait TranscriptStore: Send + Sync {
    /// Snapshot of the session, creating an empty one if absent.
    fn get_or_create(&self, session_id: &str) -> Session;

    /// Append a user turn and an assistant turn, then trim to the retention window.
    fn append_exchange(&self, session_id: &str, user_text: &str, assistant_text: &str);

    /// Remove the session. Returns whether anything was removed.
    fn clear(&self, session_id: &str) -> bool;

    /// Remove every session idle since before `now - idle_timeout`.
    /// Returns the number of sessions removed.
    fn sweep(&self, now: DateTime<Utc>) -> usize;
}
