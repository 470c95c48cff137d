use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bankstock_core::{ItemId, OrganizationId};
use bankstock_inventory::{ItemCatalog, OnHandAggregator};

const MINIMUM_ALERT: &str =
    "The following items have fallen below the minimum on hand quantity, bank-wide";
const RECOMMENDED_ALERT: &str =
    "The following items have fallen below the recommended on hand quantity, bank-wide";

/// Classification of the items touched by a commit.
///
/// An item appears in at most one list: the minimum check takes precedence
/// over the recommended one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdReport {
    pub below_minimum: Vec<String>,
    pub below_recommended: Vec<String>,
}

impl ThresholdReport {
    pub fn is_clear(&self) -> bool {
        self.below_minimum.is_empty() && self.below_recommended.is_empty()
    }

    /// Human-readable alert strings, minimum breaches first. Empty when no
    /// threshold was crossed.
    pub fn alerts(&self) -> Vec<String> {
        let mut alerts = Vec::new();
        if !self.below_minimum.is_empty() {
            alerts.push(format!("{MINIMUM_ALERT}: {}", self.below_minimum.join(", ")));
        }
        if !self.below_recommended.is_empty() {
            alerts.push(format!(
                "{RECOMMENDED_ALERT}: {}",
                self.below_recommended.join(", ")
            ));
        }
        alerts
    }
}

/// Evaluates organization-wide on-hand totals against item thresholds.
///
/// Runs only after a successful commit and never raises: items with no
/// threshold configured (or unknown ids) simply skip the check.
pub struct ThresholdEvaluator {
    aggregator: OnHandAggregator,
    items: Arc<dyn ItemCatalog>,
}

impl ThresholdEvaluator {
    pub fn new(aggregator: OnHandAggregator, items: Arc<dyn ItemCatalog>) -> Self {
        Self { aggregator, items }
    }

    /// Classify each touched item by its current bank-wide total. Duplicate
    /// ids are evaluated once, in first-seen order.
    pub fn evaluate(&self, organization_id: OrganizationId, touched: &[ItemId]) -> ThresholdReport {
        let mut report = ThresholdReport::default();
        let mut seen: Vec<ItemId> = Vec::with_capacity(touched.len());

        for &item_id in touched {
            if seen.contains(&item_id) {
                continue;
            }
            seen.push(item_id);

            let Some(item) = self.items.item(item_id) else {
                continue;
            };
            let total = self.aggregator.total_on_hand(organization_id, item_id);

            if total < item.minimum_quantity() {
                report.below_minimum.push(item.name().to_string());
            } else if item.recommended_quantity().is_some_and(|r| total < r) {
                report.below_recommended.push(item.name().to_string());
            }
        }

        if !report.is_clear() {
            tracing::info!(
                organization_id = %organization_id,
                below_minimum = report.below_minimum.len(),
                below_recommended = report.below_recommended.len(),
                "threshold breach detected after commit"
            );
        }

        report
    }
}
