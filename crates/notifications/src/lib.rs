//! Notification policy and dispatch port.
//!
//! The engine decides *whether* to notify and with what payload; delivery
//! (mailer, job queue) is an external collaborator behind
//! [`NotificationDispatcher`].

pub mod dispatcher;
pub mod policy;

pub use dispatcher::{ChangeNotice, NotificationDispatcher, ReminderSchedule, CHANGE_NOTICE_SUBJECT};
pub use policy::reminder_due;
