//! Infrastructure layer: transaction orchestration and in-memory adapters.
//!
//! The domain crates define ports (ledger, catalogs, stores, dispatcher);
//! this crate composes them into the [`engine::DistributionEngine`] and
//! provides in-memory implementations of every port for tests, development,
//! and embedding.

pub mod catalog;
pub mod directory;
pub mod dispatch;
pub mod distributions;
pub mod engine;
pub mod ledger;
pub mod partners;

#[cfg(test)]
mod integration_tests;

pub use catalog::InMemoryItemCatalog;
pub use directory::InMemoryStorageLocationDirectory;
pub use dispatch::RecordingDispatcher;
pub use distributions::InMemoryDistributionStore;
pub use engine::{CommitOutcome, DistributionEngine, DistributionRequest, DistributionUpdate};
pub use ledger::InMemoryLedger;
pub use partners::InMemoryPartnerDirectory;
