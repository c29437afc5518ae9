// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The activity
// domain (writer, cascade, dispatcher) is plain functions that use these
// traits through `ActivityDeps`.
//
// Naming convention: Base* for trait names (e.g., BaseDocumentStore)

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::common::UserId;

/// Opaque document id. Either store-assigned or supplied by the caller for
/// deterministic upserts.
pub type DocumentId = String;

/// A document read back from the store.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: DocumentId,
    pub data: JsonValue,
}

/// A single equality predicate. Predicates in a query combine by implicit AND.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: &'static str,
    pub value: JsonValue,
}

/// Shorthand for building an equality filter.
pub fn eq(field: &'static str, value: impl Into<JsonValue>) -> Filter {
    Filter {
        field,
        value: value.into(),
    }
}

/// One queued write operation.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Create or fully replace a document. With `id: None` the store assigns
    /// a fresh id; with an explicit id this is an upsert.
    Set {
        collection: String,
        id: Option<DocumentId>,
        data: JsonValue,
    },
    /// Shallow-merge `patch` into an existing document. Fails the whole batch
    /// if the document does not exist.
    Update {
        collection: String,
        id: DocumentId,
        patch: JsonValue,
    },
    /// Physically remove a document. Unused by the ledger (records are only
    /// ever soft-deleted) but part of the store contract.
    Delete {
        collection: String,
        id: DocumentId,
    },
}

/// Accumulates write operations to be committed atomically as a unit.
///
/// Atomicity covers exactly one `commit` call; there is no isolation or
/// atomicity across batches.
#[derive(Debug, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(
        &mut self,
        collection: impl Into<String>,
        id: Option<DocumentId>,
        data: JsonValue,
    ) -> &mut Self {
        self.ops.push(WriteOp::Set {
            collection: collection.into(),
            id,
            data,
        });
        self
    }

    pub fn update(
        &mut self,
        collection: impl Into<String>,
        id: DocumentId,
        patch: JsonValue,
    ) -> &mut Self {
        self.ops.push(WriteOp::Update {
            collection: collection.into(),
            id,
            patch,
        });
        self
    }

    pub fn delete(&mut self, collection: impl Into<String>, id: DocumentId) -> &mut Self {
        self.ops.push(WriteOp::Delete {
            collection: collection.into(),
            id,
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn into_ops(self) -> Vec<WriteOp> {
        self.ops
    }
}

/// Errors surfaced by document store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document {collection}/{id} not found")]
    NotFound { collection: String, id: String },
    #[error("store backend unavailable: {0}")]
    Unavailable(String),
}

// =============================================================================
// Document Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseDocumentStore: Send + Sync {
    /// Insert a document with a store-assigned id.
    async fn add(&self, collection: &str, data: JsonValue) -> Result<DocumentId>;

    /// Fetch one document by id. `Ok(None)` when it does not exist.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Return all documents matching every filter (implicit AND), up to
    /// `limit` when given. Only equality predicates are supported.
    async fn get_where(
        &self,
        collection: &str,
        filters: &[Filter],
        limit: Option<usize>,
    ) -> Result<Vec<Document>>;

    /// Apply every queued operation atomically. Either all operations land or
    /// none do.
    async fn commit(&self, batch: WriteBatch) -> Result<()>;
}

// =============================================================================
// User Directory Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseUserDirectory: Send + Sync {
    /// Build a username -> user id map from the full user directory.
    async fn username_map(&self) -> Result<HashMap<String, UserId>>;
}

// =============================================================================
// Reputation Service Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseReputationService: Send + Sync {
    /// Apply a score delta to a user's profile.
    async fn change_profile_score(&self, user_id: UserId, delta: i64) -> Result<()>;
}
