//! Calendar events as the reconciler sees them.
//!
//! Backends convert their own representation into these types; the
//! reconciler only ever holds an event's id between passes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::window::TimeWindow;

/// A calendar event (backend-neutral)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub window: TimeWindow,
    /// Reminders/alarms for this event
    pub reminders: Vec<Reminder>,
    /// IANA timezone the window is expressed in; floating when absent
    pub tzid: Option<String>,
    /// Last modification timestamp (LAST-MODIFIED)
    pub updated: Option<DateTime<Utc>>,
}

impl Event {
    pub fn new(id: String, title: &str, window: TimeWindow, description: &str) -> Self {
        Event {
            id,
            title: title.to_string(),
            description: Some(description.to_string()),
            window,
            reminders: Vec::new(),
            tzid: None,
            updated: None,
        }
    }

    /// Reminder offsets in minutes, in the order they were added.
    pub fn reminder_minutes(&self) -> Vec<i64> {
        self.reminders.iter().map(|r| r.minutes).collect()
    }
}

/// A popup reminder for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Minutes before the event to trigger
    pub minutes: i64,
}
