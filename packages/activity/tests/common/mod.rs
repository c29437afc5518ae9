// Common test utilities

pub mod fixtures;

pub use fixtures::*;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use activity_core::domains::activity::models::fields;
use activity_core::domains::activity::USER_ACTIVITY_COLLECTION;
use activity_core::kernel::{eq, BaseDocumentStore, Document, Filter, TestDependencies};

static TRACING: Once = Once::new();

/// Directory: bob -> 7, alice -> 9.
pub fn harness() -> TestDependencies {
    TRACING.call_once(activity_core::kernel::init_tracing);
    TestDependencies::new()
        .with_user("bob", 7)
        .with_user("alice", 9)
}

/// All non-deleted activity records matching the extra filters.
pub async fn active_records(harness: &TestDependencies, extra: &[Filter]) -> Vec<Document> {
    let mut filters = vec![eq(fields::IS_DELETED, false)];
    filters.extend_from_slice(extra);
    harness
        .store
        .get_where(USER_ACTIVITY_COLLECTION, &filters, None)
        .await
        .unwrap()
}

/// All records (deleted or not) matching the filters.
pub async fn all_records(harness: &TestDependencies, filters: &[Filter]) -> Vec<Document> {
    harness
        .store
        .get_where(USER_ACTIVITY_COLLECTION, filters, None)
        .await
        .unwrap()
}

/// Poll an async condition until it holds or a second passes.
pub async fn eventually<F, Fut>(mut condition: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..100 {
        if condition().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met within 1s");
}
