//! Integration tests for the full distribution transaction pipeline.
//!
//! Tests: Request → DistributionEngine → Ledger → ThresholdEvaluator →
//! NotificationDispatcher, all over the in-memory adapters.

use std::sync::Arc;

use chrono::{Days, NaiveDate, Utc};

use bankstock_core::{DomainError, ItemId, OrganizationId, PartnerId, StorageLocationId};
use bankstock_distribution::{DistributionStore, ItemChange, LineItem};
use bankstock_inventory::{Item, Ledger, StorageLocation};
use bankstock_notifications::CHANGE_NOTICE_SUBJECT;
use bankstock_partners::Partner;

use crate::{
    DistributionEngine, DistributionRequest, DistributionUpdate, InMemoryDistributionStore,
    InMemoryItemCatalog, InMemoryLedger, InMemoryPartnerDirectory,
    InMemoryStorageLocationDirectory, RecordingDispatcher,
};

struct TestContext {
    engine: DistributionEngine,
    ledger: Arc<InMemoryLedger>,
    catalog: Arc<InMemoryItemCatalog>,
    directory: Arc<InMemoryStorageLocationDirectory>,
    store: Arc<InMemoryDistributionStore>,
    dispatcher: Arc<RecordingDispatcher>,
    organization_id: OrganizationId,
    partner_id: PartnerId,
    location_id: StorageLocationId,
}

impl TestContext {
    /// Register an item and stock it at the primary location.
    fn stock_item(
        &self,
        name: &str,
        minimum: i64,
        recommended: Option<i64>,
        quantity: i64,
    ) -> ItemId {
        let item_id = ItemId::new();
        let mut item = Item::new(item_id, self.organization_id, name)
            .unwrap()
            .with_minimum_quantity(minimum)
            .unwrap();
        if let Some(recommended) = recommended {
            item = item.with_recommended_quantity(recommended).unwrap();
        }
        self.catalog.insert(item).unwrap();
        if quantity > 0 {
            self.ledger
                .increment(self.location_id, item_id, quantity)
                .unwrap();
        }
        item_id
    }

    fn request(&self, issued_at: NaiveDate, line_items: Vec<LineItem>) -> DistributionRequest {
        DistributionRequest {
            organization_id: self.organization_id,
            partner_id: self.partner_id,
            storage_location_id: self.location_id,
            issued_at,
            reminder_email_enabled: false,
            line_items,
        }
    }

    fn update_request(
        &self,
        issued_at: NaiveDate,
        line_items: Vec<LineItem>,
    ) -> DistributionUpdate {
        DistributionUpdate {
            storage_location_id: self.location_id,
            issued_at,
            reminder_email_enabled: false,
            line_items,
        }
    }
}

fn setup() -> TestContext {
    setup_with_partner(true)
}

fn setup_with_partner(send_reminders: bool) -> TestContext {
    bankstock_observability::init();

    let organization_id = OrganizationId::new();
    let partner_id = PartnerId::new();
    let location_id = StorageLocationId::new();

    let ledger = Arc::new(InMemoryLedger::new());
    let catalog = Arc::new(InMemoryItemCatalog::new());
    let directory = Arc::new(InMemoryStorageLocationDirectory::new());
    let partners = Arc::new(InMemoryPartnerDirectory::new());
    let store = Arc::new(InMemoryDistributionStore::new());
    let dispatcher = Arc::new(RecordingDispatcher::new());

    directory
        .register(StorageLocation::new(location_id, organization_id, "Main Bank").unwrap())
        .unwrap();
    partners
        .register(
            Partner::new(partner_id, organization_id, "Neighborhood Agency", send_reminders)
                .unwrap(),
        )
        .unwrap();

    let engine = DistributionEngine::new(
        ledger.clone(),
        catalog.clone(),
        directory.clone(),
        partners.clone(),
        store.clone(),
        dispatcher.clone(),
    );

    TestContext {
        engine,
        ledger,
        catalog,
        directory,
        store,
        dispatcher,
        organization_id,
        partner_id,
        location_id,
    }
}

fn yesterday() -> NaiveDate {
    Utc::now().date_naive() - Days::new(1)
}

fn tomorrow() -> NaiveDate {
    Utc::now().date_naive() + Days::new(1)
}

#[test]
fn create_commits_and_reports_a_minimum_breach_bank_wide() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item X", 5, None, 20);

    let outcome = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 18)]))
        .unwrap();

    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, item_id), 2);
    assert_eq!(
        outcome.alerts,
        vec![
            "The following items have fallen below the minimum on hand quantity, \
             bank-wide: Item X"
                .to_string()
        ]
    );
    assert!(outcome.changes.is_empty());

    let persisted = ctx.store.get(outcome.distribution_id).unwrap();
    assert_eq!(persisted.line_items(), &[LineItem::new(item_id, 18)]);
}

#[test]
fn create_above_thresholds_reports_plain_success() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item X", 5, None, 20);

    let outcome = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 10)]))
        .unwrap();

    assert!(outcome.alerts.is_empty());
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, item_id), 10);
}

#[test]
fn create_rejects_zero_quantity_lines_without_touching_the_ledger() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 5, None, 2);

    let err = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 0)]))
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::invalid_quantity("Item 1")
    );
    assert_eq!(
        err.user_message(),
        "Sorry, we weren't able to save the distribution. \n \
         Validation failed: Inventory Item 1's quantity needs to be at least 1"
    );
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, item_id), 2);
    assert!(ctx.dispatcher.reminders().is_empty());
}

#[test]
fn failed_multi_line_commit_rolls_back_earlier_deductions() {
    let ctx = setup();
    let plenty = ctx.stock_item("Plenty", 0, None, 50);
    let scarce = ctx.stock_item("Scarce", 0, None, 3);

    let err = ctx
        .engine
        .create(ctx.request(
            yesterday(),
            vec![LineItem::new(plenty, 10), LineItem::new(scarce, 4)],
        ))
        .unwrap_err();

    assert_eq!(err, DomainError::insufficient_quantity("Scarce", 4, 3));
    // First deduction was compensated; ledger is exactly as before.
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, plenty), 50);
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, scarce), 3);
}

#[test]
fn create_combines_duplicate_line_items_before_deducting() {
    let ctx = setup();
    let item_id = ctx.stock_item("Wipes", 0, None, 10);

    let outcome = ctx
        .engine
        .create(ctx.request(
            yesterday(),
            vec![LineItem::new(item_id, 4), LineItem::new(item_id, 3)],
        ))
        .unwrap();

    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, item_id), 3);
    let persisted = ctx.store.get(outcome.distribution_id).unwrap();
    assert_eq!(persisted.line_items(), &[LineItem::new(item_id, 7)]);
}

#[test]
fn create_rejects_unknown_and_cross_organization_references() {
    let ctx = setup();
    let foreign_item = ItemId::new();
    ctx.catalog
        .insert(Item::new(foreign_item, OrganizationId::new(), "Foreign").unwrap())
        .unwrap();

    let err = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(foreign_item, 1)]))
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);

    let mut request = ctx.request(yesterday(), vec![]);
    request.storage_location_id = StorageLocationId::new();
    assert_eq!(ctx.engine.create(request).unwrap_err(), DomainError::NotFound);
}

#[test]
fn threshold_totals_aggregate_across_locations() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item X", 5, None, 4);

    // A second location holding more of the same item keeps the bank-wide
    // total above the minimum.
    let second_location = StorageLocationId::new();
    ctx.directory
        .register(
            StorageLocation::new(second_location, ctx.organization_id, "Annex").unwrap(),
        )
        .unwrap();
    ctx.ledger.increment(second_location, item_id, 10).unwrap();

    let outcome = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 2)]))
        .unwrap();

    // 2 at the main location + 10 at the annex = 12 >= 5.
    assert!(outcome.alerts.is_empty());
}

#[test]
fn update_reports_quantity_changes_and_sends_the_change_notice() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 0, None, 20);

    let created = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 10)]))
        .unwrap();

    let outcome = ctx
        .engine
        .update(
            created.distribution_id,
            ctx.update_request(yesterday(), vec![LineItem::new(item_id, 4)]),
        )
        .unwrap();

    assert_eq!(
        outcome.changes.updated,
        vec![ItemChange {
            name: "Item 1".to_string(),
            old_quantity: 10,
            new_quantity: 4,
        }]
    );
    assert!(outcome.changes.removed.is_empty());
    // 6 units went back to the shelf.
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, item_id), 16);

    let notices = ctx.dispatcher.change_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].subject, CHANGE_NOTICE_SUBJECT);
    assert_eq!(notices[0].organization_id, ctx.organization_id);
    assert_eq!(notices[0].distribution_id, created.distribution_id);
    assert_eq!(notices[0].changes, outcome.changes);
}

#[test]
fn update_removal_returns_quantity_and_reports_the_removed_item() {
    let ctx = setup();
    let kept = ctx.stock_item("Kept", 0, None, 20);
    let dropped = ctx.stock_item("Dropped", 0, None, 20);

    let created = ctx
        .engine
        .create(ctx.request(
            yesterday(),
            vec![LineItem::new(kept, 10), LineItem::new(dropped, 5)],
        ))
        .unwrap();

    let outcome = ctx
        .engine
        .update(
            created.distribution_id,
            ctx.update_request(yesterday(), vec![LineItem::new(kept, 10)]),
        )
        .unwrap();

    assert_eq!(outcome.changes.removed, vec!["Dropped"]);
    assert!(outcome.changes.updated.is_empty());
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, dropped), 20);

    let persisted = ctx.store.get(created.distribution_id).unwrap();
    assert_eq!(persisted.line_items(), &[LineItem::new(kept, 10)]);
}

#[test]
fn update_with_only_new_lines_sends_no_change_notice() {
    let ctx = setup();
    let original = ctx.stock_item("Original", 0, None, 20);
    let added = ctx.stock_item("Added", 0, None, 20);

    let created = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(original, 5)]))
        .unwrap();

    let outcome = ctx
        .engine
        .update(
            created.distribution_id,
            ctx.update_request(
                yesterday(),
                vec![LineItem::new(original, 5), LineItem::new(added, 3)],
            ),
        )
        .unwrap();

    assert!(outcome.changes.is_empty());
    assert!(ctx.dispatcher.change_notices().is_empty());
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, added), 17);
}

#[test]
fn failed_update_leaves_ledger_and_distribution_untouched() {
    let ctx = setup();
    let stable = ctx.stock_item("Stable", 0, None, 20);
    let greedy = ctx.stock_item("Greedy", 0, None, 10);

    let created = ctx
        .engine
        .create(ctx.request(
            yesterday(),
            vec![LineItem::new(stable, 5), LineItem::new(greedy, 5)],
        ))
        .unwrap();

    // Asking for 5 -> 20 on "Greedy" needs 15 more but only 5 remain; the
    // freed-up "Stable" units must be re-deducted by the rollback.
    let err = ctx
        .engine
        .update(
            created.distribution_id,
            ctx.update_request(
                yesterday(),
                vec![LineItem::new(stable, 2), LineItem::new(greedy, 20)],
            ),
        )
        .unwrap_err();

    assert_eq!(err, DomainError::insufficient_quantity("Greedy", 15, 5));
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, stable), 15);
    assert_eq!(ctx.ledger.quantity_of(ctx.location_id, greedy), 5);

    let persisted = ctx.store.get(created.distribution_id).unwrap();
    assert_eq!(
        persisted.line_items(),
        &[LineItem::new(stable, 5), LineItem::new(greedy, 5)]
    );
    assert!(ctx.dispatcher.change_notices().is_empty());
}

#[test]
fn update_evaluates_thresholds_over_the_new_quantities() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 5, None, 20);

    let created = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 2)]))
        .unwrap();

    let outcome = ctx
        .engine
        .update(
            created.distribution_id,
            ctx.update_request(yesterday(), vec![LineItem::new(item_id, 18)]),
        )
        .unwrap();

    assert_eq!(
        outcome.alerts,
        vec![
            "The following items have fallen below the minimum on hand quantity, \
             bank-wide: Item 1"
                .to_string()
        ]
    );
}

#[test]
fn update_rejects_a_different_storage_location() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 0, None, 20);

    let created = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 5)]))
        .unwrap();

    let mut request = ctx.update_request(yesterday(), vec![LineItem::new(item_id, 5)]);
    request.storage_location_id = StorageLocationId::new();
    let err = ctx.engine.update(created.distribution_id, request).unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn reminder_is_scheduled_only_for_future_dates_with_both_flags() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 0, None, 50);

    let mut request = ctx.request(tomorrow(), vec![LineItem::new(item_id, 1)]);
    request.reminder_email_enabled = true;
    let outcome = ctx.engine.create(request).unwrap();

    let reminders = ctx.dispatcher.reminders();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].distribution_id, outcome.distribution_id);
    assert_eq!(reminders[0].deliver_on, tomorrow());

    // Past issuance never schedules, flags notwithstanding.
    let mut past = ctx.request(yesterday(), vec![LineItem::new(item_id, 1)]);
    past.reminder_email_enabled = true;
    ctx.engine.create(past).unwrap();
    assert_eq!(ctx.dispatcher.reminders().len(), 1);

    // Distribution flag off: no reminder either.
    ctx.engine
        .create(ctx.request(tomorrow(), vec![LineItem::new(item_id, 1)]))
        .unwrap();
    assert_eq!(ctx.dispatcher.reminders().len(), 1);
}

#[test]
fn partner_opt_out_suppresses_reminders() {
    let ctx = setup_with_partner(false);
    let item_id = ctx.stock_item("Item 1", 0, None, 10);

    let mut request = ctx.request(tomorrow(), vec![LineItem::new(item_id, 1)]);
    request.reminder_email_enabled = true;
    ctx.engine.create(request).unwrap();

    assert!(ctx.dispatcher.reminders().is_empty());
}

#[test]
fn update_can_enable_a_reminder_when_the_date_moves_to_the_future() {
    let ctx = setup();
    let item_id = ctx.stock_item("Item 1", 0, None, 10);

    let created = ctx
        .engine
        .create(ctx.request(yesterday(), vec![LineItem::new(item_id, 1)]))
        .unwrap();
    assert!(ctx.dispatcher.reminders().is_empty());

    let mut request = ctx.update_request(tomorrow(), vec![LineItem::new(item_id, 1)]);
    request.reminder_email_enabled = true;
    ctx.engine.update(created.distribution_id, request).unwrap();

    let reminders = ctx.dispatcher.reminders();
    assert_eq!(reminders.len(), 1);
    assert_eq!(reminders[0].deliver_on, tomorrow());
}

#[test]
fn update_of_an_unknown_distribution_is_not_found() {
    let ctx = setup();
    let err = ctx
        .engine
        .update(
            bankstock_core::DistributionId::new(),
            ctx.update_request(yesterday(), vec![]),
        )
        .unwrap_err();
    assert_eq!(err, DomainError::NotFound);
}
