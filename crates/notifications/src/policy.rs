//! Reminder gating rule.

use chrono::NaiveDate;

/// Whether a reminder notification must be scheduled for a just-committed
/// distribution.
///
/// True iff the distribution opted in, the partner opted in, and the issuance
/// date is strictly in the future. Same-day and past dates never schedule.
/// The rule is evaluated fresh at every commit; there is no reschedule or
/// cancel bookkeeping.
pub fn reminder_due(
    reminder_email_enabled: bool,
    partner_send_reminders: bool,
    issued_at: NaiveDate,
    today: NaiveDate,
) -> bool {
    reminder_email_enabled && partner_send_reminders && issued_at > today
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn gating_table_covers_all_combinations() {
        let today = date("2026-03-10");
        let tomorrow = date("2026-03-11");
        let yesterday = date("2026-03-09");

        let cases = [
            // (distribution flag, partner flag, issued_at, expected)
            (true, true, tomorrow, true),
            (true, true, today, false),
            (true, true, yesterday, false),
            (true, false, tomorrow, false),
            (false, true, tomorrow, false),
            (false, false, tomorrow, false),
            (true, false, yesterday, false),
            (false, true, yesterday, false),
            (false, false, yesterday, false),
        ];

        for (enabled, partner, issued_at, expected) in cases {
            assert_eq!(
                reminder_due(enabled, partner, issued_at, today),
                expected,
                "enabled={enabled} partner={partner} issued_at={issued_at}"
            );
        }
    }
}
