//! In-memory session store with a bounded sliding window and idle expiry.
//!
//! Sessions live in a `DashMap` keyed by session id. Each entry is mutated
//! only while its shard guard is held, so an exchange is appended and
//! trimmed atomically and the sweeper never observes half an exchange.
//! Guards are never held across `.await` (there are no async methods here).

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;

use oncochat_types::chat::{Session, Turn};

use super::TranscriptStore;

/// Retention and expiry settings for a [`SessionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStoreConfig {
    /// Maximum turns kept per session. Rounded down to an even number (min 2).
    pub retention_window: usize,
    /// Sessions idle longer than this are removed by `sweep`.
    pub idle_timeout: Duration,
    /// Period of the background sweeper.
    pub sweep_interval: Duration,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            retention_window: 20,
            idle_timeout: Duration::from_secs(60 * 60),
            sweep_interval: Duration::from_secs(60 * 60),
        }
    }
}

#[derive(Debug)]
struct SessionEntry {
    transcript: VecDeque<Turn>,
    last_accessed: DateTime<Utc>,
}

impl SessionEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            transcript: VecDeque::new(),
            last_accessed: now,
        }
    }

    /// Never moves `last_accessed` backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        if now > self.last_accessed {
            self.last_accessed = now;
        }
    }

    fn snapshot(&self, session_id: &str) -> Session {
        Session {
            session_id: session_id.to_string(),
            transcript: self.transcript.iter().cloned().collect(),
            last_accessed: self.last_accessed,
        }
    }
}

/// Concurrent in-memory transcript store.
///
/// Cloning produces a shared view of the same sessions (backed by `Arc`).
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<String, SessionEntry>>,
    config: SessionStoreConfig,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new(mut config: SessionStoreConfig) -> Self {
        config.retention_window = (config.retention_window - config.retention_window % 2).max(2);
        Self {
            inner: Arc::new(DashMap::new()),
            config,
        }
    }

    /// Effective configuration (with the retention window already rounded).
    pub fn config(&self) -> &SessionStoreConfig {
        &self.config
    }

    /// Like [`TranscriptStore::get_or_create`] with an explicit clock reading.
    pub fn get_or_create_at(&self, session_id: &str, now: DateTime<Utc>) -> Session {
        let mut entry = self
            .inner
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::new(now));
        entry.touch(now);
        entry.snapshot(session_id)
    }

    /// Like [`TranscriptStore::append_exchange`] with an explicit clock reading.
    pub fn append_exchange_at(
        &self,
        session_id: &str,
        user_text: &str,
        assistant_text: &str,
        now: DateTime<Utc>,
    ) {
        let mut entry = self
            .inner
            .entry(session_id.to_string())
            .or_insert_with(|| SessionEntry::new(now));

        entry.transcript.push_back(Turn::user(user_text));
        entry.transcript.push_back(Turn::assistant(assistant_text));

        // Drop whole exchanges from the front so alternation survives the trim.
        while entry.transcript.len() > self.config.retention_window {
            entry.transcript.pop_front();
            entry.transcript.pop_front();
        }

        entry.touch(now);
    }

    /// Current transcript of a session (creating and touching it).
    pub fn history(&self, session_id: &str) -> Vec<Turn> {
        self.get_or_create(session_id).transcript
    }

    /// Whether a session currently exists. Does not touch it.
    pub fn contains(&self, session_id: &str) -> bool {
        self.inner.contains_key(session_id)
    }

    /// Snapshot of all current session ids.
    pub fn session_ids(&self) -> Vec<String> {
        self.inner.iter().map(|r| r.key().clone()).collect()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionStoreConfig::default())
    }
}

impl TranscriptStore for SessionStore {
    fn get_or_create(&self, session_id: &str) -> Session {
        self.get_or_create_at(session_id, Utc::now())
    }

    fn append_exchange(&self, session_id: &str, user_text: &str, assistant_text: &str) {
        self.append_exchange_at(session_id, user_text, assistant_text, Utc::now());
    }

    fn clear(&self, session_id: &str) -> bool {
        self.inner.remove(session_id).is_some()
    }

    fn sweep(&self, now: DateTime<Utc>) -> usize {
        let idle = TimeDelta::from_std(self.config.idle_timeout).unwrap_or(TimeDelta::MAX);
        let Some(cutoff) = now.checked_sub_signed(idle) else {
            return 0;
        };

        // Iterate a key snapshot: removing while iterating the map would
        // deadlock on the shard lock. Expiry is re-checked under the guard so
        // a session touched after the snapshot survives.
        let mut removed = 0;
        for key in self.session_ids() {
            if self
                .inner
                .remove_if(&key, |_, entry| entry.last_accessed < cutoff)
                .is_some()
            {
                tracing::debug!(session_id = %key, "Evicted idle session");
                removed += 1;
            }
        }
        removed
    }
}
