// TestDependencies - mock implementations for testing
//
// Provides in-memory services that can be injected as ActivityDeps for
// tests: the memory document store, a static username directory, and a spy
// reputation service capturing score changes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::deps::ActivityDeps;
use super::memory_store::MemoryDocumentStore;
use super::traits::{BaseReputationService, BaseUserDirectory};
use crate::common::UserId;

// =============================================================================
// Static User Directory
// =============================================================================

/// A fixed username -> id directory.
#[derive(Default)]
pub struct StaticUserDirectory {
    users: Mutex<HashMap<String, UserId>>,
}

impl StaticUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(self, username: &str, id: UserId) -> Self {
        self.users.lock().unwrap().insert(username.to_string(), id);
        self
    }
}

#[async_trait]
impl BaseUserDirectory for StaticUserDirectory {
    async fn username_map(&self) -> Result<HashMap<String, UserId>> {
        Ok(self.users.lock().unwrap().clone())
    }
}

/// A directory whose reads always fail, for error-propagation tests.
pub struct FailingUserDirectory;

#[async_trait]
impl BaseUserDirectory for FailingUserDirectory {
    async fn username_map(&self) -> Result<HashMap<String, UserId>> {
        Err(anyhow!("directory read rejected"))
    }
}

// =============================================================================
// Spy Reputation Service
// =============================================================================

/// Captures every score change instead of applying it anywhere.
#[derive(Default)]
pub struct SpyReputationService {
    calls: Mutex<Vec<(UserId, i64)>>,
}

impl SpyReputationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// All (user_id, delta) pairs recorded so far.
    pub fn calls(&self) -> Vec<(UserId, i64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseReputationService for SpyReputationService {
    async fn change_profile_score(&self, user_id: UserId, delta: i64) -> Result<()> {
        self.calls.lock().unwrap().push((user_id, delta));
        Ok(())
    }
}

// =============================================================================
// TestDependencies
// =============================================================================

/// Bundle of in-memory services plus the `ActivityDeps` view over them.
///
/// Keeps concrete handles alongside the trait-object container so tests can
/// reach mock-specific helpers (`fail_next_commits`, `calls`, ...).
pub struct TestDependencies {
    pub store: Arc<MemoryDocumentStore>,
    pub directory: Arc<StaticUserDirectory>,
    pub reputation: Arc<SpyReputationService>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MemoryDocumentStore::new()),
            directory: Arc::new(StaticUserDirectory::new()),
            reputation: Arc::new(SpyReputationService::new()),
        }
    }

    pub fn with_user(mut self, username: &str, id: UserId) -> Self {
        let directory = Arc::try_unwrap(self.directory)
            .unwrap_or_else(|_| panic!("directory already shared"))
            .with_user(username, id);
        self.directory = Arc::new(directory);
        self
    }

    pub fn deps(&self) -> ActivityDeps {
        ActivityDeps::new(
            self.store.clone(),
            self.directory.clone(),
            self.reputation.clone(),
        )
    }

    /// Deps whose directory reads always fail.
    pub fn deps_with_failing_directory(&self) -> ActivityDeps {
        ActivityDeps::new(
            self.store.clone(),
            Arc::new(FailingUserDirectory),
            self.reputation.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
