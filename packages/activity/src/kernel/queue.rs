//! Bounded activity queue.
//!
//! Mutation handlers enqueue events here right after their primary write;
//! the `ActivityWorker` drains the queue off the request path. A bounded
//! channel gives backpressure instead of the silent loss an unawaited
//! fire-and-forget call would allow.

use anyhow::{anyhow, Result};
use tokio::sync::mpsc;

use crate::domains::activity::ActivityEvent;
use crate::kernel::ActivityDeps;

use super::worker::ActivityWorker;

/// Configuration for the queue/worker pair.
#[derive(Debug, Clone)]
pub struct ActivityQueueConfig {
    /// Maximum number of events buffered between enqueue and processing.
    pub capacity: usize,
    /// Dispatch attempts per event before it is dead-lettered.
    pub max_attempts: u32,
    /// Base delay between attempts; grows linearly with the attempt number.
    pub retry_backoff: std::time::Duration,
}

impl Default for ActivityQueueConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            max_attempts: 3,
            retry_backoff: std::time::Duration::from_millis(250),
        }
    }
}

/// Producer half of the activity pipeline. Cheap to clone.
#[derive(Clone)]
pub struct ActivityQueue {
    tx: mpsc::Sender<ActivityEvent>,
}

impl ActivityQueue {
    /// Build a queue and its worker. The worker must be spawned (or run) for
    /// enqueued events to make progress.
    pub fn new(deps: ActivityDeps, config: ActivityQueueConfig) -> (Self, ActivityWorker) {
        let (tx, rx) = mpsc::channel(config.capacity);
        let worker = ActivityWorker::new(deps, config, rx);
        (Self { tx }, worker)
    }

    /// Enqueue an event, waiting for capacity when the queue is full. Errors
    /// only when the worker has shut down.
    pub async fn enqueue(&self, event: ActivityEvent) -> Result<()> {
        self.tx
            .send(event)
            .await
            .map_err(|_| anyhow!("activity worker stopped, event rejected"))
    }

    /// Non-blocking enqueue for callers that cannot await. Errors when the
    /// queue is full or the worker has shut down.
    pub fn try_enqueue(&self, event: ActivityEvent) -> Result<()> {
        self.tx
            .try_send(event)
            .map_err(|err| anyhow!("activity event rejected: {err}"))
    }
}
