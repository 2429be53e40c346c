//! Reminder policy: a fixed set of day offsets, reapplied in full on every pass.

use crate::constants::{DEFAULT_REMINDER_DAYS, MINUTES_PER_DAY};
use crate::error::JobCalResult;
use crate::store::CalendarStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPolicy {
    days: Vec<u32>,
}

impl Default for ReminderPolicy {
    /// One week and three days before the appointment.
    fn default() -> Self {
        ReminderPolicy::new(DEFAULT_REMINDER_DAYS.to_vec())
    }
}

impl ReminderPolicy {
    pub fn new(days: Vec<u32>) -> Self {
        ReminderPolicy { days }
    }

    pub fn days(&self) -> &[u32] {
        &self.days
    }

    /// Offsets in minutes before the start, in policy order.
    pub fn minutes(&self) -> Vec<i64> {
        self.days
            .iter()
            .map(|&d| i64::from(d) * MINUTES_PER_DAY)
            .collect()
    }

    /// Compact label used in row statuses, e.g. `1wk & 3day`.
    pub fn short_label(&self) -> String {
        self.label(|weeks| format!("{}wk", weeks), |days| format!("{}day", days))
    }

    /// Label used in user-facing messages, e.g. `1 Week & 3 Day`.
    pub fn long_label(&self) -> String {
        self.label(|weeks| format!("{} Week", weeks), |days| format!("{} Day", days))
    }

    fn label(&self, weeks: impl Fn(u32) -> String, days: impl Fn(u32) -> String) -> String {
        self.days
            .iter()
            .map(|&d| {
                if d > 0 && d % 7 == 0 {
                    weeks(d / 7)
                } else {
                    days(d)
                }
            })
            .collect::<Vec<_>>()
            .join(" & ")
    }
}

/// Replace every reminder on an event with the policy's reminders.
///
/// The event itself is already saved by the time this runs, so failures are
/// logged and swallowed rather than failing the row.
pub fn apply_reminders(calendar: &mut dyn CalendarStore, event_id: &str, policy: &ReminderPolicy) {
    if let Err(e) = replace_reminders(calendar, event_id, policy) {
        tracing::warn!(event_id, error = %e, "Error setting reminders");
    }
}

fn replace_reminders(
    calendar: &mut dyn CalendarStore,
    event_id: &str,
    policy: &ReminderPolicy,
) -> JobCalResult<()> {
    calendar.remove_all_reminders(event_id)?;

    for minutes in policy.minutes() {
        calendar.add_popup_reminder(event_id, minutes)?;
    }

    Ok(())
}
