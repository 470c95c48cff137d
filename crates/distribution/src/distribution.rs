use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bankstock_core::{
    DistributionId, Entity, ItemId, OrganizationId, PartnerId, StorageLocationId,
};

/// One (item, quantity) entry within a distribution.
///
/// A committed line item always has `quantity >= 1`; quantity 0 only appears
/// transiently in update requests, where it means "remove this line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_id: ItemId,
    pub quantity: i64,
}

impl LineItem {
    pub fn new(item_id: ItemId, quantity: i64) -> Self {
        Self { item_id, quantity }
    }
}

/// Merge duplicate item ids by summing quantities, preserving first-seen
/// order. Requests coming off a form may repeat an item across rows; the
/// ledger must see one delta per item.
pub fn combine_line_items(line_items: Vec<LineItem>) -> Vec<LineItem> {
    let mut combined: Vec<LineItem> = Vec::with_capacity(line_items.len());
    for line in line_items {
        match combined.iter_mut().find(|l| l.item_id == line.item_id) {
            Some(existing) => existing.quantity += line.quantity,
            None => combined.push(line),
        }
    }
    combined
}

/// Distribution lifecycle status.
///
/// Rejected distributions are never persisted; a loaded distribution is
/// always `Committed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStatus {
    Committed,
    Rejected,
}

/// A committed distribution: the authoritative record of what was deducted
/// from the ledger for one partner issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    id: DistributionId,
    organization_id: OrganizationId,
    partner_id: PartnerId,
    storage_location_id: StorageLocationId,
    issued_at: NaiveDate,
    reminder_email_enabled: bool,
    status: DistributionStatus,
    line_items: Vec<LineItem>,
}

impl Distribution {
    /// Assemble a committed distribution record. The engine only calls this
    /// after every ledger deduction has succeeded.
    #[allow(clippy::too_many_arguments)]
    pub fn committed(
        id: DistributionId,
        organization_id: OrganizationId,
        partner_id: PartnerId,
        storage_location_id: StorageLocationId,
        issued_at: NaiveDate,
        reminder_email_enabled: bool,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            id,
            organization_id,
            partner_id,
            storage_location_id,
            issued_at,
            reminder_email_enabled,
            status: DistributionStatus::Committed,
            line_items,
        }
    }

    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    pub fn partner_id(&self) -> PartnerId {
        self.partner_id
    }

    pub fn storage_location_id(&self) -> StorageLocationId {
        self.storage_location_id
    }

    pub fn issued_at(&self) -> NaiveDate {
        self.issued_at
    }

    pub fn reminder_email_enabled(&self) -> bool {
        self.reminder_email_enabled
    }

    pub fn status(&self) -> DistributionStatus {
        self.status
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Item ids touched by this distribution, in line order.
    pub fn touched_items(&self) -> Vec<ItemId> {
        self.line_items.iter().map(|l| l.item_id).collect()
    }

    /// Replace the whole line-item set (update path; never partial) along
    /// with the attributes an update may carry.
    pub fn replace(
        &mut self,
        issued_at: NaiveDate,
        reminder_email_enabled: bool,
        line_items: Vec<LineItem>,
    ) {
        self.issued_at = issued_at;
        self.reminder_email_enabled = reminder_email_enabled;
        self.line_items = line_items;
    }
}

impl Entity for Distribution {
    type Id = DistributionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
