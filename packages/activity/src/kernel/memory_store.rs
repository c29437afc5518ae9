//! In-memory document store.
//!
//! Implements the `BaseDocumentStore` contract over a mutex-guarded map:
//! collection/document addressing with auto-generated ids, equality-only
//! `where` queries, and atomic batch commits. Used by the test suite and as
//! a reference for what a production backend must provide.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::traits::{
    BaseDocumentStore, Document, DocumentId, Filter, StoreError, WriteBatch, WriteOp,
};

type Collection = BTreeMap<DocumentId, JsonValue>;

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: Mutex<HashMap<String, Collection>>,
    /// Number of upcoming commits that should fail (test hook).
    commit_failures: AtomicU32,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` commits fail with `StoreError::Unavailable`.
    pub fn fail_next_commits(&self, n: u32) {
        self.commit_failures.store(n, Ordering::SeqCst);
    }

    /// Total number of documents in a collection, deleted or not.
    pub fn document_count(&self, collection: &str) -> usize {
        let collections = self.collections.lock().unwrap();
        collections.get(collection).map_or(0, |c| c.len())
    }

    fn matches(data: &JsonValue, filters: &[Filter]) -> bool {
        filters
            .iter()
            .all(|f| data.get(f.field) == Some(&f.value))
    }

    fn merge(target: &mut JsonValue, patch: &JsonValue) {
        if let (Some(target), Some(patch)) = (target.as_object_mut(), patch.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

#[async_trait]
impl BaseDocumentStore for MemoryDocumentStore {
    async fn add(&self, collection: &str, data: JsonValue) -> Result<DocumentId> {
        let id = Uuid::now_v7().to_string();
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), data);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|data| Document {
                id: id.to_string(),
                data: data.clone(),
            }))
    }

    async fn get_where(
        &self,
        collection: &str,
        filters: &[Filter],
        limit: Option<usize>,
    ) -> Result<Vec<Document>> {
        let collections = self.collections.lock().unwrap();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let matching = docs
            .iter()
            .filter(|(_, data)| Self::matches(data, filters))
            .map(|(id, data)| Document {
                id: id.clone(),
                data: data.clone(),
            });

        Ok(match limit {
            Some(n) => matching.take(n).collect(),
            None => matching.collect(),
        })
    }

    async fn commit(&self, batch: WriteBatch) -> Result<()> {
        if self
            .commit_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(StoreError::Unavailable("injected commit failure".to_string()).into());
        }

        let ops = batch.into_ops();
        let mut collections = self.collections.lock().unwrap();

        // Validate before mutating so a failed batch leaves no partial state.
        for op in &ops {
            if let WriteOp::Update { collection, id, .. } = op {
                let exists = collections
                    .get(collection)
                    .is_some_and(|c| c.contains_key(id));
                if !exists {
                    return Err(StoreError::NotFound {
                        collection: collection.clone(),
                        id: id.clone(),
                    }
                    .into());
                }
            }
        }

        for op in ops {
            match op {
                WriteOp::Set {
                    collection,
                    id,
                    data,
                } => {
                    let id = id.unwrap_or_else(|| Uuid::now_v7().to_string());
                    collections.entry(collection).or_default().insert(id, data);
                }
                WriteOp::Update {
                    collection,
                    id,
                    patch,
                } => {
                    // Presence checked above.
                    if let Some(doc) = collections
                        .get_mut(&collection)
                        .and_then(|c| c.get_mut(&id))
                    {
                        Self::merge(doc, &patch);
                    }
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(c) = collections.get_mut(&collection) {
                        c.remove(&id);
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::traits::eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_add_assigns_distinct_ids() {
        let store = MemoryDocumentStore::new();
        let a = store.add("c", json!({"v": 1})).await.unwrap();
        let b = store.add("c", json!({"v": 2})).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(store.document_count("c"), 2);
    }

    #[tokio::test]
    async fn test_get_fetches_by_id() {
        let store = MemoryDocumentStore::new();
        let id = store.add("c", json!({"v": 1})).await.unwrap();

        let doc = store.get("c", &id).await.unwrap().unwrap();
        assert_eq!(doc.data["v"], json!(1));

        assert!(store.get("c", "missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_where_applies_all_filters() {
        let store = MemoryDocumentStore::new();
        store
            .add("c", json!({"network": "polkadot", "by": 1}))
            .await
            .unwrap();
        store
            .add("c", json!({"network": "polkadot", "by": 2}))
            .await
            .unwrap();
        store
            .add("c", json!({"network": "kusama", "by": 1}))
            .await
            .unwrap();

        let docs = store
            .get_where("c", &[eq("network", "polkadot"), eq("by", 1)], None)
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);

        let docs = store
            .get_where("c", &[eq("by", 1)], Some(1))
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_field_does_not_match() {
        let store = MemoryDocumentStore::new();
        store.add("c", json!({"by": 1})).await.unwrap();

        let docs = store
            .get_where("c", &[eq("comment_id", "x")], None)
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_set_with_explicit_id_upserts() {
        let store = MemoryDocumentStore::new();

        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 1}));
        store.commit(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 2}));
        store.commit(batch).await.unwrap();

        assert_eq!(store.document_count("c"), 1);
        let docs = store.get_where("c", &[eq("v", 2)], None).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].id, "k1");
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let store = MemoryDocumentStore::new();
        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 1, "is_deleted": false}));
        store.commit(batch).await.unwrap();

        let mut batch = WriteBatch::new();
        batch.update("c", "k1".to_string(), json!({"is_deleted": true}));
        store.commit(batch).await.unwrap();

        let docs = store.get_where("c", &[eq("is_deleted", true)], None).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].data["v"], json!(1));
    }

    #[tokio::test]
    async fn test_failed_batch_applies_nothing() {
        let store = MemoryDocumentStore::new();

        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 1}));
        batch.update("c", "missing".to_string(), json!({"v": 2}));
        let err = store.commit(batch).await.unwrap_err();

        assert!(err.downcast_ref::<StoreError>().is_some());
        assert_eq!(store.document_count("c"), 0);
    }

    #[tokio::test]
    async fn test_injected_commit_failures_run_out() {
        let store = MemoryDocumentStore::new();
        store.fail_next_commits(1);

        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 1}));
        assert!(store.commit(batch).await.is_err());

        let mut batch = WriteBatch::new();
        batch.set("c", Some("k1".to_string()), json!({"v": 1}));
        assert!(store.commit(batch).await.is_ok());
    }
}
