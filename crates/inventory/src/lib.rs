//! Inventory domain module.
//!
//! This crate contains the inventory-side business rules: items and their
//! on-hand thresholds, storage locations, the ledger port (the only mutation
//! point for quantities), and the organization-wide on-hand aggregator.
//! No IO, no HTTP, no storage — adapters live in `bankstock-infra`.

pub mod item;
pub mod ledger;
pub mod on_hand;
pub mod storage_location;

pub use item::{Item, ItemCatalog};
pub use ledger::{Ledger, LedgerError};
pub use on_hand::OnHandAggregator;
pub use storage_location::{StorageLocation, StorageLocationDirectory};
