//! The inventory ledger port: per-(storage location, item) quantity counters.
//!
//! The ledger is the **only** mutation point for on-hand quantities. All
//! implementations must keep every counter non-negative and make
//! `decrement`/`increment` serializable per key: two concurrent decrements
//! against the same key must never both succeed if their combined amount would
//! drive the counter below zero.

use bankstock_core::{ItemId, StorageLocationId};
use thiserror::Error;

/// Ledger-level error.
///
/// Carries ids, not names — the engine resolves item names when mapping into
/// the caller-facing `DomainError`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The deduction would drive the counter negative. Nothing was mutated.
    #[error(
        "insufficient quantity for item {item_id} at location {storage_location_id}: \
         requested {requested}, available {available}"
    )]
    Insufficient {
        storage_location_id: StorageLocationId,
        item_id: ItemId,
        requested: i64,
        available: i64,
    },

    /// Amounts handed to the ledger must be >= 1.
    #[error("ledger amount must be positive, got {0}")]
    NonPositiveAmount(i64),

    /// Backing store failure (e.g. poisoned lock).
    #[error("ledger storage error: {0}")]
    Storage(String),
}

/// Atomic quantity counters keyed by (storage location, item).
pub trait Ledger: Send + Sync {
    /// Atomically lower the counter by `amount`.
    ///
    /// Fails with [`LedgerError::Insufficient`] if `current - amount < 0`,
    /// leaving the counter untouched. Returns the new quantity on success.
    fn decrement(
        &self,
        storage_location_id: StorageLocationId,
        item_id: ItemId,
        amount: i64,
    ) -> Result<i64, LedgerError>;

    /// Atomically raise the counter by `amount` (unconditional; used to give
    /// quantity back during an update or to reverse a prior deduction).
    /// Returns the new quantity.
    fn increment(
        &self,
        storage_location_id: StorageLocationId,
        item_id: ItemId,
        amount: i64,
    ) -> Result<i64, LedgerError>;

    /// Point read of the current counter. 0 for keys never supplied.
    fn quantity_of(&self, storage_location_id: StorageLocationId, item_id: ItemId) -> i64;
}
