//! Tests for the bounded at-least-once activity pipeline: delivery through
//! the worker, retry-then-dead-letter on persistent failure, and shutdown.

mod common;

use common::*;

use std::time::Duration;

use activity_core::domains::activity::models::fields;
use activity_core::domains::activity::DEAD_LETTER_COLLECTION;
use activity_core::kernel::{
    eq, ActivityQueue, ActivityQueueConfig, BaseDocumentStore, TestDependencies,
};
use serde_json::json;

fn fast_config() -> ActivityQueueConfig {
    ActivityQueueConfig {
        capacity: 16,
        max_attempts: 2,
        retry_backoff: Duration::from_millis(10),
    }
}

#[tokio::test]
async fn enqueued_event_reaches_the_store() {
    let harness = harness();
    let (queue, worker) = ActivityQueue::new(harness.deps(), fast_config());
    let cancel = worker.cancellation_token();
    let handle = worker.spawn();

    queue
        .enqueue(comment_created("c1", "hi user/bob"))
        .await
        .unwrap();

    eventually(|| async {
        active_records(&harness, &[eq(fields::TYPE, "COMMENTED")])
            .await
            .len()
            == 1
    })
    .await;

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn events_process_in_enqueue_order() {
    let harness = harness();
    let (queue, worker) = ActivityQueue::new(harness.deps(), fast_config());
    let cancel = worker.cancellation_token();
    let handle = worker.spawn();

    queue
        .enqueue(comment_created("c1", "hi user/bob"))
        .await
        .unwrap();
    queue
        .enqueue(comment_edited("c1", "now user/alice"))
        .await
        .unwrap();

    eventually(|| async {
        let mentioned = active_records(&harness, &[eq(fields::TYPE, "MENTIONED")]).await;
        mentioned.len() == 1 && mentioned[0].data["mentions"] == json!([9])
    })
    .await;

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn persistently_failing_event_is_dead_lettered() {
    let harness = harness();
    // Directory reads always fail, so any mention-bearing event keeps
    // erroring until the worker gives up.
    let (queue, worker) = ActivityQueue::new(harness.deps_with_failing_directory(), fast_config());
    let cancel = worker.cancellation_token();
    let handle = worker.spawn();

    queue
        .enqueue(comment_created("c1", "hi user/bob"))
        .await
        .unwrap();

    eventually(|| async { harness.store.document_count(DEAD_LETTER_COLLECTION) == 1 }).await;

    let letters = harness
        .store
        .get_where(DEAD_LETTER_COLLECTION, &[], None)
        .await
        .unwrap();
    assert_eq!(letters[0].data["kind"], json!("comment_created"));
    assert_eq!(letters[0].data["network"], json!(NETWORK));
    assert_eq!(letters[0].data["attempts"], json!(2));

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn worker_stops_when_all_queue_handles_drop() {
    let harness = harness();
    let (queue, worker) = ActivityQueue::new(harness.deps(), fast_config());
    let handle = worker.spawn();

    queue
        .enqueue(comment_created("c1", "drained before stop"))
        .await
        .unwrap();
    drop(queue);

    handle.await.unwrap();
    assert_eq!(
        active_records(&harness, &[eq(fields::TYPE, "COMMENTED")])
            .await
            .len(),
        1
    );
}

#[tokio::test]
async fn try_enqueue_rejects_when_full() {
    let harness = TestDependencies::new();
    let config = ActivityQueueConfig {
        capacity: 1,
        ..fast_config()
    };
    // Worker deliberately not spawned: nothing drains the channel.
    let (queue, _worker) = ActivityQueue::new(harness.deps(), config);

    assert!(queue.try_enqueue(comment_created("c1", "first")).is_ok());
    assert!(queue.try_enqueue(comment_created("c2", "second")).is_err());
}
