//! Distribution transaction orchestration.
//!
//! This module implements the create/update transaction pipeline over the
//! domain ports:
//!
//! ```text
//! Request
//!   ↓
//! 1. Resolve references (partner, storage location, items; organization-scoped)
//!   ↓
//! 2. Validate line items (combine duplicates, quantity rules)
//!   ↓
//! 3. Apply ledger deltas (all-or-nothing; compensation journal on failure)
//!   ↓
//! 4. Persist the distribution
//!   ↓
//! 5. Post-commit: threshold evaluation → alert strings
//!   ↓
//! 6. Notification policy: change notice (update only, synchronous),
//!    reminder scheduling (fire-and-forget)
//! ```
//!
//! Steps 1–4 are atomic from the caller's perspective: any failure rolls the
//! ledger back to its pre-attempt state and nothing is persisted or
//! dispatched. Steps 5–6 run only after a successful commit and can no longer
//! fail the transaction.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use bankstock_alerts::ThresholdEvaluator;
use bankstock_core::{
    DistributionId, DomainError, DomainResult, Entity, ItemId, OrganizationId, PartnerId,
    StorageLocationId,
};
use bankstock_distribution::{
    combine_line_items, Distribution, DistributionStore, LineItem, LineItemDiff,
};
use bankstock_inventory::{
    ItemCatalog, Ledger, LedgerError, OnHandAggregator, StorageLocationDirectory,
};
use bankstock_notifications::{
    reminder_due, ChangeNotice, NotificationDispatcher, ReminderSchedule,
};
use bankstock_partners::PartnerDirectory;

/// Intake payload for creating a distribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionRequest {
    pub organization_id: OrganizationId,
    pub partner_id: PartnerId,
    pub storage_location_id: StorageLocationId,
    pub issued_at: NaiveDate,
    pub reminder_email_enabled: bool,
    pub line_items: Vec<LineItem>,
}

/// Intake payload for updating a committed distribution.
///
/// The new line-item set replaces the old one wholesale; quantity 0 means
/// removal. The storage location must match the committed one — relocation is
/// an intake-layer concern, not an engine operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionUpdate {
    pub storage_location_id: StorageLocationId,
    pub issued_at: NaiveDate,
    pub reminder_email_enabled: bool,
    pub line_items: Vec<LineItem>,
}

/// Successful commit result: the distribution persisted, plus any threshold
/// alerts and (for updates) the change diff the intake layer may surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    pub distribution_id: DistributionId,
    pub alerts: Vec<String>,
    pub changes: LineItemDiff,
}

/// Inverse of an applied ledger operation, journaled for rollback.
enum Compensation {
    Increment(ItemId, i64),
    Decrement(ItemId, i64),
}

/// Orchestrates distribution create/update transactions against the ledger
/// and downstream evaluation/notification.
pub struct DistributionEngine {
    ledger: Arc<dyn Ledger>,
    items: Arc<dyn ItemCatalog>,
    partners: Arc<dyn PartnerDirectory>,
    distributions: Arc<dyn DistributionStore>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    locations: Arc<dyn StorageLocationDirectory>,
    evaluator: ThresholdEvaluator,
}

impl DistributionEngine {
    pub fn new(
        ledger: Arc<dyn Ledger>,
        items: Arc<dyn ItemCatalog>,
        locations: Arc<dyn StorageLocationDirectory>,
        partners: Arc<dyn PartnerDirectory>,
        distributions: Arc<dyn DistributionStore>,
        dispatcher: Arc<dyn NotificationDispatcher>,
    ) -> Self {
        let aggregator = OnHandAggregator::new(Arc::clone(&ledger), Arc::clone(&locations));
        let evaluator = ThresholdEvaluator::new(aggregator, Arc::clone(&items));
        Self {
            ledger,
            items,
            partners,
            distributions,
            dispatcher,
            locations,
            evaluator,
        }
    }

    /// Create path: validate, deduct every line from the ledger
    /// (all-or-nothing), persist, then evaluate thresholds and the reminder
    /// policy.
    pub fn create(&self, request: DistributionRequest) -> DomainResult<CommitOutcome> {
        let organization_id = request.organization_id;

        let partner = self
            .partners
            .partner(request.partner_id)
            .filter(|p| p.organization_id() == organization_id)
            .ok_or(DomainError::NotFound)?;
        let location = self
            .locations
            .storage_location(request.storage_location_id)
            .filter(|l| l.organization_id() == organization_id)
            .ok_or(DomainError::NotFound)?;
        let location_id = *location.id();

        let line_items = combine_line_items(request.line_items);
        let names = self.resolve_names(organization_id, line_items.iter().map(|l| l.item_id))?;
        for line in &line_items {
            if line.quantity < 1 {
                return Err(DomainError::invalid_quantity(names[&line.item_id].as_str()));
            }
        }

        // Committing: deduct each line, journaling inverse operations so a
        // mid-loop failure leaves the ledger exactly as it was.
        let mut journal: Vec<Compensation> = Vec::with_capacity(line_items.len());
        for line in &line_items {
            match self.ledger.decrement(location_id, line.item_id, line.quantity) {
                Ok(_) => journal.push(Compensation::Increment(line.item_id, line.quantity)),
                Err(err) => {
                    self.rollback(location_id, journal);
                    return Err(self.map_ledger_error(err, &names));
                }
            }
        }

        let distribution_id = DistributionId::new();
        let distribution = Distribution::committed(
            distribution_id,
            organization_id,
            request.partner_id,
            location_id,
            request.issued_at,
            request.reminder_email_enabled,
            line_items.clone(),
        );
        if let Err(err) = self.distributions.insert(distribution) {
            self.rollback(location_id, journal);
            return Err(err);
        }

        tracing::info!(
            distribution_id = %distribution_id,
            organization_id = %organization_id,
            line_items = line_items.len(),
            "distribution committed"
        );

        let touched: Vec<ItemId> = line_items.iter().map(|l| l.item_id).collect();
        let alerts = self.evaluator.evaluate(organization_id, &touched).alerts();

        if reminder_due(
            request.reminder_email_enabled,
            partner.send_reminders(),
            request.issued_at,
            Utc::now().date_naive(),
        ) {
            self.dispatcher.schedule_reminder(ReminderSchedule {
                distribution_id,
                deliver_on: request.issued_at,
            });
        }

        Ok(CommitOutcome {
            distribution_id,
            alerts,
            changes: LineItemDiff::default(),
        })
    }

    /// Update path: reconcile the committed line-item set against the new one
    /// by net deltas (all-or-nothing), replace the persisted set, then diff,
    /// evaluate thresholds over old ∪ new, and notify.
    pub fn update(
        &self,
        distribution_id: DistributionId,
        request: DistributionUpdate,
    ) -> DomainResult<CommitOutcome> {
        let mut distribution = self
            .distributions
            .get(distribution_id)
            .ok_or(DomainError::NotFound)?;
        let organization_id = distribution.organization_id();
        let location_id = distribution.storage_location_id();

        if request.storage_location_id != location_id {
            return Err(DomainError::validation(
                "changing the storage location of a committed distribution is not supported",
            ));
        }

        let partner = self
            .partners
            .partner(distribution.partner_id())
            .ok_or(DomainError::NotFound)?;

        let old_items = distribution.line_items().to_vec();
        let new_items = combine_line_items(request.line_items);

        let names = self.resolve_names(
            organization_id,
            old_items
                .iter()
                .chain(new_items.iter())
                .map(|l| l.item_id),
        )?;
        // Quantity 0 is removal here, not a validation failure.
        for line in &new_items {
            if line.quantity < 0 {
                return Err(DomainError::invalid_quantity(names[&line.item_id].as_str()));
            }
        }

        let journal = self.apply_deltas(location_id, &old_items, &new_items, &names)?;

        let committed_items: Vec<LineItem> = new_items
            .iter()
            .copied()
            .filter(|l| l.quantity >= 1)
            .collect();
        let diff = LineItemDiff::between(&old_items, &committed_items, |item_id| {
            names
                .get(&item_id)
                .cloned()
                .unwrap_or_else(|| item_id.to_string())
        });

        distribution.replace(
            request.issued_at,
            request.reminder_email_enabled,
            committed_items.clone(),
        );
        if let Err(err) = self.distributions.update(distribution) {
            self.rollback(location_id, journal);
            return Err(err);
        }

        tracing::info!(
            distribution_id = %distribution_id,
            organization_id = %organization_id,
            removed = diff.removed.len(),
            updated = diff.updated.len(),
            "distribution update committed"
        );

        // Conservatively re-evaluate everything the update touched, removed
        // items included: old set order first, then items new to this set.
        let mut touched: Vec<ItemId> = old_items.iter().map(|l| l.item_id).collect();
        for line in &committed_items {
            if !touched.contains(&line.item_id) {
                touched.push(line.item_id);
            }
        }
        let alerts = self.evaluator.evaluate(organization_id, &touched).alerts();

        // The change notice is synchronous: it goes out before the update
        // reports success. Brand-new lines alone do not trigger it.
        if !diff.is_empty() {
            self.dispatcher.send_change_notice(ChangeNotice::new(
                organization_id,
                distribution_id,
                diff.clone(),
            ));
        }

        if reminder_due(
            request.reminder_email_enabled,
            partner.send_reminders(),
            request.issued_at,
            Utc::now().date_naive(),
        ) {
            self.dispatcher.schedule_reminder(ReminderSchedule {
                distribution_id,
                deliver_on: request.issued_at,
            });
        }

        Ok(CommitOutcome {
            distribution_id,
            alerts,
            changes: diff,
        })
    }

    /// Apply per-item net deltas for an update. Increments (giving quantity
    /// back) run before decrements (taking more), and every applied operation
    /// is journaled so a failed decrement restores the pre-attempt state.
    fn apply_deltas(
        &self,
        location_id: StorageLocationId,
        old_items: &[LineItem],
        new_items: &[LineItem],
        names: &HashMap<ItemId, String>,
    ) -> DomainResult<Vec<Compensation>> {
        let old_quantities: HashMap<ItemId, i64> =
            old_items.iter().map(|l| (l.item_id, l.quantity)).collect();

        let mut gives: Vec<(ItemId, i64)> = Vec::new();
        let mut takes: Vec<(ItemId, i64)> = Vec::new();
        let mut seen: Vec<ItemId> = Vec::new();
        for line in old_items.iter().chain(new_items.iter()) {
            if seen.contains(&line.item_id) {
                continue;
            }
            seen.push(line.item_id);

            let old_quantity = old_quantities.get(&line.item_id).copied().unwrap_or(0);
            let new_quantity = new_items
                .iter()
                .find(|l| l.item_id == line.item_id)
                .map(|l| l.quantity)
                .unwrap_or(0);
            let delta = new_quantity - old_quantity;
            if delta < 0 {
                gives.push((line.item_id, -delta));
            } else if delta > 0 {
                takes.push((line.item_id, delta));
            }
        }

        let mut journal: Vec<Compensation> = Vec::new();
        for (item_id, amount) in gives {
            match self.ledger.increment(location_id, item_id, amount) {
                Ok(_) => journal.push(Compensation::Decrement(item_id, amount)),
                Err(err) => {
                    self.rollback(location_id, journal);
                    return Err(self.map_ledger_error(err, names));
                }
            }
        }
        for (item_id, amount) in takes {
            match self.ledger.decrement(location_id, item_id, amount) {
                Ok(_) => journal.push(Compensation::Increment(item_id, amount)),
                Err(err) => {
                    self.rollback(location_id, journal);
                    return Err(self.map_ledger_error(err, names));
                }
            }
        }
        Ok(journal)
    }

    /// Replay journaled inverse operations, newest first.
    fn rollback(&self, location_id: StorageLocationId, journal: Vec<Compensation>) {
        for compensation in journal.into_iter().rev() {
            let result = match compensation {
                Compensation::Increment(item_id, amount) => {
                    self.ledger.increment(location_id, item_id, amount)
                }
                Compensation::Decrement(item_id, amount) => {
                    self.ledger.decrement(location_id, item_id, amount)
                }
            };
            if let Err(err) = result {
                tracing::error!(
                    storage_location_id = %location_id,
                    error = %err,
                    "ledger rollback operation failed"
                );
            }
        }
    }

    /// Resolve display names for every referenced item, enforcing
    /// organization scoping: a missing or cross-organization item is
    /// `NotFound`.
    fn resolve_names(
        &self,
        organization_id: OrganizationId,
        item_ids: impl Iterator<Item = ItemId>,
    ) -> DomainResult<HashMap<ItemId, String>> {
        let mut names = HashMap::new();
        for item_id in item_ids {
            if names.contains_key(&item_id) {
                continue;
            }
            let item = self
                .items
                .item(item_id)
                .filter(|i| i.organization_id() == organization_id)
                .ok_or(DomainError::NotFound)?;
            names.insert(item_id, item.name().to_string());
        }
        Ok(names)
    }

    fn map_ledger_error(
        &self,
        err: LedgerError,
        names: &HashMap<ItemId, String>,
    ) -> DomainError {
        match err {
            LedgerError::Insufficient {
                item_id,
                requested,
                available,
                ..
            } => {
                let name = names
                    .get(&item_id)
                    .cloned()
                    .unwrap_or_else(|| item_id.to_string());
                DomainError::insufficient_quantity(name, requested, available)
            }
            LedgerError::NonPositiveAmount(amount) => {
                DomainError::validation(format!("ledger amount must be positive, got {amount}"))
            }
            LedgerError::Storage(msg) => DomainError::conflict(msg),
        }
    }
}
