//! Notification payloads and the outbound dispatch port.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use bankstock_core::{DistributionId, OrganizationId};
use bankstock_distribution::LineItemDiff;

/// Subject line of the update-path change notice.
pub const CHANGE_NOTICE_SUBJECT: &str = "Your Distribution Has Changed";

/// Request to schedule a reminder for a future-dated distribution.
///
/// `deliver_on` is the issuance date; offsetting to an exact send time is the
/// dispatcher's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSchedule {
    pub distribution_id: DistributionId,
    pub deliver_on: NaiveDate,
}

/// Synchronous notice sent to the partner when an update changed pre-existing
/// line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotice {
    pub organization_id: OrganizationId,
    pub distribution_id: DistributionId,
    pub subject: String,
    pub changes: LineItemDiff,
}

impl ChangeNotice {
    pub fn new(
        organization_id: OrganizationId,
        distribution_id: DistributionId,
        changes: LineItemDiff,
    ) -> Self {
        Self {
            organization_id,
            distribution_id,
            subject: CHANGE_NOTICE_SUBJECT.to_string(),
            changes,
        }
    }
}

/// Outbound mail/job dispatch port.
///
/// Reminders are fire-and-forget enqueues; the change notice is delivered
/// synchronously before the update reports success. Neither can fail the
/// already-committed transaction.
pub trait NotificationDispatcher: Send + Sync {
    fn schedule_reminder(&self, reminder: ReminderSchedule);

    fn send_change_notice(&self, notice: ChangeNotice);
}
