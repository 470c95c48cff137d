//! Organization-wide on-hand aggregation.

use std::sync::Arc;

use bankstock_core::{ItemId, OrganizationId};

use crate::ledger::Ledger;
use crate::storage_location::StorageLocationDirectory;

/// Computes the on-hand total for an item across every storage location an
/// organization owns.
///
/// Deliberately a pure read over the ledger's current rows, computed on
/// demand — the total is never cached as separate mutable state, so it always
/// reflects the latest committed ledger rows.
pub struct OnHandAggregator {
    ledger: Arc<dyn Ledger>,
    locations: Arc<dyn StorageLocationDirectory>,
}

impl OnHandAggregator {
    pub fn new(ledger: Arc<dyn Ledger>, locations: Arc<dyn StorageLocationDirectory>) -> Self {
        Self { ledger, locations }
    }

    /// Sum of `quantity_of` over every location the organization owns.
    pub fn total_on_hand(&self, organization_id: OrganizationId, item_id: ItemId) -> i64 {
        self.locations
            .locations_for(organization_id)
            .into_iter()
            .map(|location_id| self.ledger.quantity_of(location_id, item_id))
            .sum()
    }
}
