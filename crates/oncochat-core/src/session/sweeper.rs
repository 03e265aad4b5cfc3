//! Background task that periodically evicts idle sessions.
//!
//! The sweeper is started explicitly and stopped through a
//! `CancellationToken`; dropping the handle also cancels it.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::TranscriptStore;

/// Handle to a running sweep task.
#[derive(Debug)]
pub struct SessionSweeper {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl SessionSweeper {
    /// Spawn a task that calls `store.sweep(now)` every `interval`.
    ///
    /// The first sweep happens one full interval after start. Must be called
    /// from within a tokio runtime.
    pub fn start<S>(store: S, interval: Duration) -> Self
    where
        S: TranscriptStore + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!("Session sweeper stopped");
                        break;
                    }
                    _ = ticker.tick() => {
                        let removed = store.sweep(Utc::now());
                        if removed > 0 {
                            tracing::info!(removed, "Swept idle sessions");
                        }
                    }
                }
            }
        });

        tracing::debug!(interval_secs = interval.as_secs(), "Session sweeper started");

        Self {
            cancel,
            handle: Some(handle),
        }
    }

    /// Token that stops the sweeper when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Session sweeper task ended abnormally");
            }
        }
    }
}

impl Drop for SessionSweeper {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
