//! Recording notification dispatcher.

use std::sync::Mutex;

use bankstock_notifications::{ChangeNotice, NotificationDispatcher, ReminderSchedule};

/// Dispatcher that records every request instead of delivering it.
///
/// Used in tests and development; a real deployment wires a mailer/job-queue
/// adapter behind the same port.
#[derive(Debug, Default)]
pub struct RecordingDispatcher {
    reminders: Mutex<Vec<ReminderSchedule>>,
    change_notices: Mutex<Vec<ChangeNotice>>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reminders(&self) -> Vec<ReminderSchedule> {
        self.reminders.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn change_notices(&self) -> Vec<ChangeNotice> {
        self.change_notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }
}

impl NotificationDispatcher for RecordingDispatcher {
    fn schedule_reminder(&self, reminder: ReminderSchedule) {
        if let Ok(mut reminders) = self.reminders.lock() {
            reminders.push(reminder);
        }
    }

    fn send_change_notice(&self, notice: ChangeNotice) {
        if let Ok(mut notices) = self.change_notices.lock() {
            notices.push(notice);
        }
    }
}
