//! In-memory ledger adapter.

use std::collections::HashMap;
use std::sync::RwLock;

use bankstock_core::{ItemId, StorageLocationId};
use bankstock_inventory::{Ledger, LedgerError};

type LedgerKey = (StorageLocationId, ItemId);

/// In-memory per-(storage location, item) quantity counters.
///
/// A single map-wide write lock is coarse, but it makes every mutation
/// serializable: a decrement always observes the effect of every previously
/// committed decrement, so two concurrent deductions can never both succeed
/// past the non-negativity check.
///
/// Rows are created lazily on first increment and pruned when a counter
/// reaches zero; `quantity_of` reports 0 for untracked keys.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    rows: RwLock<HashMap<LedgerKey, i64>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Ledger for InMemoryLedger {
    fn decrement(
        &self,
        storage_location_id: StorageLocationId,
        item_id: ItemId,
        amount: i64,
    ) -> Result<i64, LedgerError> {
        if amount < 1 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let mut rows = self
            .rows
            .write()
            .map_err(|_| LedgerError::Storage("ledger lock poisoned".to_string()))?;

        let key = (storage_location_id, item_id);
        let available = rows.get(&key).copied().unwrap_or(0);
        if available - amount < 0 {
            return Err(LedgerError::Insufficient {
                storage_location_id,
                item_id,
                requested: amount,
                available,
            });
        }

        let remaining = available - amount;
        if remaining == 0 {
            rows.remove(&key);
        } else {
            rows.insert(key, remaining);
        }
        Ok(remaining)
    }

    fn increment(
        &self,
        storage_location_id: StorageLocationId,
        item_id: ItemId,
        amount: i64,
    ) -> Result<i64, LedgerError> {
        if amount < 1 {
            return Err(LedgerError::NonPositiveAmount(amount));
        }

        let mut rows = self
            .rows
            .write()
            .map_err(|_| LedgerError::Storage("ledger lock poisoned".to_string()))?;

        let counter = rows.entry((storage_location_id, item_id)).or_insert(0);
        *counter += amount;
        Ok(*counter)
    }

    fn quantity_of(&self, storage_location_id: StorageLocationId, item_id: ItemId) -> i64 {
        match self.rows.read() {
            Ok(rows) => rows
                .get(&(storage_location_id, item_id))
                .copied()
                .unwrap_or(0),
            // A poisoned lock means a writer panicked mid-mutation; report
            // empty rather than propagate into a read-only path.
            Err(_) => 0,
        }
    }
}
