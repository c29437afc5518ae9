//! Activity dependencies (using traits for testability)
//!
//! Central dependency container handed to every dispatcher/writer/cascade
//! call. All external services sit behind trait abstractions so tests can
//! inject in-memory implementations. There is deliberately no module-level
//! store instance.

use std::sync::Arc;

use super::{BaseDocumentStore, BaseReputationService, BaseUserDirectory};

/// Dependencies accessible to activity operations.
#[derive(Clone)]
pub struct ActivityDeps {
    /// Document store holding the `user_activities` collection.
    pub store: Arc<dyn BaseDocumentStore>,
    /// User directory for mention resolution.
    pub directory: Arc<dyn BaseUserDirectory>,
    /// Reputation service credited after a reaction is recorded.
    pub reputation: Arc<dyn BaseReputationService>,
}

impl ActivityDeps {
    pub fn new(
        store: Arc<dyn BaseDocumentStore>,
        directory: Arc<dyn BaseUserDirectory>,
        reputation: Arc<dyn BaseReputationService>,
    ) -> Self {
        Self {
            store,
            directory,
            reputation,
        }
    }
}
