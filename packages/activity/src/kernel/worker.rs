//! Activity worker.
//!
//! Long-running task that drains the activity queue and drives the
//! dispatcher:
//!
//! ```text
//! ActivityWorker
//!     │
//!     ├─► recv event from the bounded queue
//!     ├─► create_user_activity (dispatcher)
//!     ├─► retry with linear backoff on read failure
//!     └─► dead-letter the event after max_attempts
//! ```
//!
//! Dead-lettered events land in the `activity_dead_letter` collection as a
//! durable log of undelivered activity, so a failure before commit no longer
//! loses the event without trace.

use chrono::Utc;
use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::domains::activity::{create_user_activity, ActivityEvent, DEAD_LETTER_COLLECTION};

use super::deps::ActivityDeps;
use super::queue::ActivityQueueConfig;

pub struct ActivityWorker {
    deps: ActivityDeps,
    config: ActivityQueueConfig,
    rx: mpsc::Receiver<ActivityEvent>,
    cancel: CancellationToken,
}

impl ActivityWorker {
    pub(crate) fn new(
        deps: ActivityDeps,
        config: ActivityQueueConfig,
        rx: mpsc::Receiver<ActivityEvent>,
    ) -> Self {
        Self {
            deps,
            config,
            rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Token that stops the worker. The in-flight event finishes first.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Spawn the worker onto the runtime.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Process events until cancelled or all queue handles are dropped.
    pub async fn run(mut self) {
        info!(
            capacity = self.config.capacity,
            max_attempts = self.config.max_attempts,
            "activity worker started"
        );
        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("activity worker cancelled");
                    break;
                }
                maybe = self.rx.recv() => match maybe {
                    Some(event) => self.process(event).await,
                    None => {
                        info!("activity queue closed, worker stopping");
                        break;
                    }
                },
            }
        }
    }

    async fn process(&self, event: ActivityEvent) {
        let kind = event.kind();
        for attempt in 1..=self.config.max_attempts {
            match create_user_activity(&self.deps, event.clone()).await {
                Ok(()) => {
                    debug!(kind, attempt, "activity event processed");
                    return;
                }
                Err(err) => {
                    warn!(
                        kind,
                        attempt,
                        max_attempts = self.config.max_attempts,
                        error = %err,
                        "activity dispatch failed"
                    );
                    if attempt < self.config.max_attempts {
                        sleep(self.config.retry_backoff * attempt).await;
                    }
                }
            }
        }
        self.dead_letter(event).await;
    }

    async fn dead_letter(&self, event: ActivityEvent) {
        let kind = event.kind();
        let payload = match serde_json::to_value(&event) {
            Ok(value) => value,
            Err(err) => {
                error!(kind, error = %err, "undelivered activity event could not be serialized");
                return;
            }
        };
        let doc = json!({
            "kind": kind,
            "network": event.network(),
            "event": payload,
            "attempts": self.config.max_attempts,
            "failed_at": Utc::now(),
        });
        match self.deps.store.add(DEAD_LETTER_COLLECTION, doc).await {
            Ok(id) => warn!(kind, dead_letter_id = %id, "activity event dead-lettered"),
            Err(err) => {
                error!(kind, error = %err, "activity event lost, dead-letter write failed")
            }
        }
    }
}
