//! Kernel module - infrastructure and dependencies.

pub mod deps;
pub mod memory_store;
pub mod queue;
pub mod telemetry;
pub mod test_dependencies;
pub mod traits;
pub mod worker;

pub use deps::ActivityDeps;
pub use memory_store::MemoryDocumentStore;
pub use queue::{ActivityQueue, ActivityQueueConfig};
pub use telemetry::init_tracing;
pub use test_dependencies::{
    FailingUserDirectory, SpyReputationService, StaticUserDirectory, TestDependencies,
};
pub use traits::*;
pub use worker::ActivityWorker;
